use thiserror::Error;

/// Errors raised while computing or verifying a checksum
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The command was empty but the algorithm needs at least one byte
    #[error("invalid input: command must contain at least one byte")]
    InvalidInput,

    /// The command is too short to carry its trailing checksum
    #[error("command of {len} bytes cannot carry a {width} byte checksum")]
    Truncated { len: usize, width: usize },

    /// The trailing checksum differs from the one computed over the payload
    #[error("checksum mismatch: computed {computed:02X?}, received {received:02X?}")]
    Mismatch { computed: Vec<u8>, received: Vec<u8> },
}

pub type Result<T> = std::result::Result<T, Error>;
