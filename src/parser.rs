use nom::{
    bytes::complete::take,
    combinator::verify,
    error::{Error, ErrorKind},
    IResult,
};

use crate::protocol::*;

/// Parse the payload of a command
///
/// Takes everything but the trailing `width` checksum bytes, failing if that
/// leaves fewer than `min` bytes.
pub fn payload<'a>(
    width: usize,
    min: usize,
) -> impl FnMut(&'a [u8]) -> IResult<&'a [u8], &'a [u8]> {
    move |input: &'a [u8]| match input.len().checked_sub(width) {
        Some(len) if len >= min => take(len)(input),
        _ => Err(nom::Err::Error(Error::new(input, ErrorKind::Eof))),
    }
}

/// Parse a complete command protected by `algorithm`
///
/// The whole input is one command: the payload followed by its checksum.
/// Recomputes the checksum over the payload and verifies it against the
/// trailing bytes.
pub fn checked<'a>(
    algorithm: Algorithm,
) -> impl FnMut(&'a [u8]) -> IResult<&'a [u8], CheckedCommand> {
    move |input: &'a [u8]| {
        let (input, payload) = payload(algorithm.width(), algorithm.min_payload())(input)?;
        let checksum = algorithm.compute(payload);
        let (input, _) = verify(take(algorithm.width()), |received: &[u8]| {
            received == checksum.as_bytes()
        })(input)?;

        Ok((
            input,
            CheckedCommand {
                payload: payload.to_vec(),
                checksum,
            },
        ))
    }
}
