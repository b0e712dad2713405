#![doc = include_str!("../README.md")]
mod crc16;
mod error;
mod protocol;
mod tables;
mod xor;
pub mod parser;

pub use crc16::*;
pub use error::*;
pub use protocol::*;
pub use xor::*;
