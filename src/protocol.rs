use nom::Finish;

use crate::{
    crc16::{crc16, crc16_by_poly},
    error::{Error, Result},
    parser::checked,
    xor,
};

/// Order in which the two bytes of a CRC-16 value are emitted
///
/// Always refers to the 16-bit value itself: for the CRC-16/MODBUS value
/// `0x4B37`, [`ByteOrder::HighFirst`] emits `[0x4B, 0x37]`.
/// MODBUS RTU transmits [`ByteOrder::LowFirst`].
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ByteOrder {
    HighFirst,
    #[default]
    LowFirst,
}

impl ByteOrder {
    /// Splits `value` into two bytes in this order
    pub fn arrange(self, value: u16) -> [u8; 2] {
        match self {
            Self::HighFirst => value.to_be_bytes(),
            Self::LowFirst => value.to_le_bytes(),
        }
    }

    /// Inverse of [`ByteOrder::arrange`]
    pub fn read(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::HighFirst => u16::from_be_bytes(bytes),
            Self::LowFirst => u16::from_le_bytes(bytes),
        }
    }
}

/// `true` means high byte first
impl From<bool> for ByteOrder {
    fn from(high_first: bool) -> Self {
        if high_first {
            Self::HighFirst
        } else {
            Self::LowFirst
        }
    }
}

/// Checksum scheme used by a protocol
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Algorithm {
    /// One byte XOR of the whole command
    Xor,
    /// CRC-16/MODBUS through the lookup tables
    Crc16 {
        #[cfg_attr(feature = "serde", serde(default))]
        order: ByteOrder,
    },
    /// Bitwise CRC-16 over a caller supplied reflected polynomial
    Crc16Poly {
        poly: u16,
        #[cfg_attr(feature = "serde", serde(default))]
        order: ByteOrder,
    },
}

impl Algorithm {
    /// CRC-16/MODBUS as sent on a MODBUS RTU line
    pub const MODBUS: Self = Self::Crc16 {
        order: ByteOrder::LowFirst,
    };

    /// Number of checksum bytes appended to a command
    pub fn width(&self) -> usize {
        match self {
            Self::Xor => 1,
            Self::Crc16 { .. } | Self::Crc16Poly { .. } => 2,
        }
    }

    /// Smallest payload this algorithm accepts
    pub(crate) fn min_payload(&self) -> usize {
        match self {
            Self::Xor => 1,
            Self::Crc16 { .. } | Self::Crc16Poly { .. } => 0,
        }
    }

    pub(crate) fn compute(&self, cmd: &[u8]) -> Checksum {
        match *self {
            Self::Xor => Checksum::Xor(xor::fold(cmd)),
            Self::Crc16 { order } => Checksum::Crc16(crc16(cmd, order)),
            Self::Crc16Poly { poly, order } => {
                Checksum::Crc16(crc16_by_poly(cmd, poly, order))
            }
        }
    }

    /// Computes the checksum of `cmd`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty command under [`Algorithm::Xor`].
    pub fn checksum(&self, cmd: &[u8]) -> Result<Checksum> {
        if cmd.len() < self.min_payload() {
            return Err(Error::InvalidInput);
        }
        let checksum = self.compute(cmd);
        log::trace!(
            "{:?} checksum of {} bytes: {:02X?}",
            self,
            cmd.len(),
            checksum.as_bytes()
        );
        Ok(checksum)
    }

    /// `cmd` followed by its checksum
    ///
    /// # Errors
    ///
    /// Same as [`Algorithm::checksum`].
    pub fn append(&self, cmd: &[u8]) -> Result<Vec<u8>> {
        let checksum = self.checksum(cmd)?;
        let mut full = Vec::with_capacity(cmd.len() + self.width());
        full.extend_from_slice(cmd);
        full.extend_from_slice(checksum.as_bytes());
        Ok(full)
    }

    /// Splits a complete command into payload and trailing checksum and checks them
    ///
    /// # Errors
    ///
    /// - [`Error::Truncated`] if `command` is shorter than the checksum width.
    /// - [`Error::InvalidInput`] if an XOR command carries no payload.
    /// - [`Error::Mismatch`] if the trailing checksum is wrong.
    pub fn verify(&self, command: &[u8]) -> Result<CheckedCommand> {
        let width = self.width();
        if command.len() < width {
            log::debug!(
                "rejecting {} byte command, {:?} needs {}",
                command.len(),
                self,
                width
            );
            return Err(Error::Truncated {
                len: command.len(),
                width,
            });
        }
        let (payload, received) = command.split_at(command.len() - width);
        if payload.len() < self.min_payload() {
            log::debug!("rejecting command without payload for {:?}", self);
            return Err(Error::InvalidInput);
        }

        match checked(*self)(command).finish() {
            Ok((_, checked)) => Ok(checked),
            Err(_) => {
                let computed = self.compute(payload).as_bytes().to_vec();
                log::debug!(
                    "checksum mismatch for {:?}: computed {:02X?}, received {:02X?}",
                    self,
                    computed,
                    received
                );
                Err(Error::Mismatch {
                    computed,
                    received: received.to_vec(),
                })
            }
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::MODBUS
    }
}

/// A computed checksum, in transmission order
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Checksum {
    Xor(u8),
    Crc16([u8; 2]),
}

impl Checksum {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Xor(check) => std::slice::from_ref(check),
            Self::Crc16(check) => check.as_slice(),
        }
    }
}

/// Command whose trailing checksum has been verified
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckedCommand {
    /// Command bytes without the checksum
    #[cfg_attr(feature = "serde", serde(with = "serde_bytes"))]
    pub payload: Vec<u8>,
    pub checksum: Checksum,
}
