use crate::error::{Error, Result};

pub(crate) fn fold(cmd: &[u8]) -> u8 {
    cmd.iter().fold(0x00, |check, &byte| check ^ byte)
}

/// Bitwise XOR of every byte of `cmd`
///
/// A single byte command checksums to itself.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `cmd` is empty.
pub fn xor(cmd: &[u8]) -> Result<u8> {
    if cmd.is_empty() {
        return Err(Error::InvalidInput);
    }
    Ok(fold(cmd))
}

/// `cmd` followed by its [`xor`] checksum
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `cmd` is empty.
pub fn xor_full(cmd: &[u8]) -> Result<Vec<u8>> {
    let check = xor(cmd)?;
    let mut full = Vec::with_capacity(cmd.len() + 1);
    full.extend_from_slice(cmd);
    full.push(check);
    Ok(full)
}
