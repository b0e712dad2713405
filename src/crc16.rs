use crate::protocol::ByteOrder;
use crate::tables::{CRC_HI, CRC_LO};

const INIT: u16 = 0xFFFF;

/// Reflected polynomial of CRC-16/MODBUS (and CRC-16/IBM)
pub const MODBUS_POLY: u16 = 0xA001;

/// CRC-16/MODBUS value of `cmd`, computed with the lookup tables
///
/// An empty command yields the initial value `0xFFFF`.
pub fn crc16_value(cmd: &[u8]) -> u16 {
    let [lo, hi] = INIT.to_le_bytes();
    let (lo, hi) = cmd.iter().fold((lo, hi), |(lo, hi), &byte| {
        let index = (lo ^ byte) as usize;
        (hi ^ CRC_HI[index], CRC_LO[index])
    });
    u16::from_le_bytes([lo, hi])
}

/// Table driven CRC-16/MODBUS of `cmd`, arranged as `order`
pub fn crc16(cmd: &[u8], order: ByteOrder) -> [u8; 2] {
    order.arrange(crc16_value(cmd))
}

/// `cmd` followed by its [`crc16`] checksum
pub fn crc16_full(cmd: &[u8], order: ByteOrder) -> Vec<u8> {
    append(cmd, crc16(cmd, order))
}

/// Bitwise CRC-16 of `cmd` over a reflected polynomial
///
/// Starts from `0xFFFF` and shifts right, so `poly` has to be given in
/// reflected form, e.g. [`MODBUS_POLY`] rather than `0x8005`.
pub fn crc16_by_poly_value(cmd: &[u8], poly: u16) -> u16 {
    let mut crc = INIT;
    for &byte in cmd {
        crc ^= byte as u16;
        for _bit in 0..8 {
            let carry = crc & 1;
            crc >>= 1;
            if carry != 0 {
                crc ^= poly;
            }
        }
    }
    crc
}

/// Bitwise CRC-16 of `cmd` over `poly`, arranged as `order`
pub fn crc16_by_poly(cmd: &[u8], poly: u16, order: ByteOrder) -> [u8; 2] {
    order.arrange(crc16_by_poly_value(cmd, poly))
}

/// `cmd` followed by its [`crc16_by_poly`] checksum
pub fn crc16_by_poly_full(cmd: &[u8], poly: u16, order: ByteOrder) -> Vec<u8> {
    append(cmd, crc16_by_poly(cmd, poly, order))
}

fn append(cmd: &[u8], check: [u8; 2]) -> Vec<u8> {
    let mut full = Vec::with_capacity(cmd.len() + check.len());
    full.extend_from_slice(cmd);
    full.extend(check);
    full
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc16_check_string() {
        assert_eq!(crc16_value(b"123456789"), 0x4B37);
        assert_eq!(crc16(b"123456789", ByteOrder::HighFirst), [0x4B, 0x37]);
        assert_eq!(crc16(b"123456789", ByteOrder::LowFirst), [0x37, 0x4B]);
    }

    #[test]
    fn crc16_modbus_request() {
        let input = hex::decode("01030000000A").unwrap();
        assert_eq!(crc16(&input, ByteOrder::LowFirst), [0xC5, 0xCD]);
        assert_eq!(
            crc16_full(&input, ByteOrder::LowFirst),
            hex::decode("01030000000AC5CD").unwrap()
        );
    }

    #[test]
    fn crc16_empty_is_initial_value() {
        assert_eq!(crc16_value(&[]), 0xFFFF);
        assert_eq!(crc16(&[], ByteOrder::HighFirst), [0xFF, 0xFF]);
        assert_eq!(crc16(&[], ByteOrder::LowFirst), [0xFF, 0xFF]);
        for poly in [0x0000, MODBUS_POLY, 0x8408, 0xFFFF] {
            assert_eq!(crc16_by_poly_value(&[], poly), 0xFFFF);
        }
    }

    #[test]
    fn crc16_by_poly_check_string() {
        assert_eq!(crc16_by_poly_value(b"123456789", MODBUS_POLY), 0x4B37);
        // CRC-16/MCRF4XX
        assert_eq!(
            crc16_by_poly(b"123456789", 0x8408, ByteOrder::HighFirst),
            [0x6F, 0x91]
        );
    }

    #[test]
    fn table_and_bitwise_agree() {
        let inputs = [
            hex::decode("01030000000A").unwrap(),
            hex::decode("110300000002").unwrap(),
            b"getinfo".to_vec(),
            (0..=255).collect::<Vec<u8>>(),
            vec![0x00; 64],
            vec![0xFF; 3],
        ];
        for input in &inputs {
            for order in [ByteOrder::HighFirst, ByteOrder::LowFirst] {
                assert_eq!(
                    crc16(input, order),
                    crc16_by_poly(input, MODBUS_POLY, order)
                );
            }
        }
    }

    #[test]
    fn byte_order_only_swaps() {
        let input = hex::decode("110300000002").unwrap();
        let [a, b] = crc16(&input, ByteOrder::HighFirst);
        assert_eq!(crc16(&input, ByteOrder::LowFirst), [b, a]);
        let [a, b] = crc16_by_poly(&input, 0x8408, ByteOrder::HighFirst);
        assert_eq!(crc16_by_poly(&input, 0x8408, ByteOrder::LowFirst), [b, a]);
    }

    #[test]
    fn full_variants_append_checksum() {
        let input = b"getinfo";
        let full = crc16_full(input, ByteOrder::HighFirst);
        assert_eq!(full.len(), input.len() + 2);
        assert_eq!(&full[..input.len()], input);
        assert_eq!(full[input.len()..], crc16(input, ByteOrder::HighFirst));

        let full = crc16_by_poly_full(input, 0x8408, ByteOrder::LowFirst);
        assert_eq!(full.len(), input.len() + 2);
        assert_eq!(full[input.len()..], crc16_by_poly(input, 0x8408, ByteOrder::LowFirst));
    }

    #[test]
    fn repeated_calls_are_stable() {
        let input = hex::decode("110300000002").unwrap();
        let first = crc16(&input, ByteOrder::LowFirst);
        for _ in 0..8 {
            assert_eq!(crc16(&input, ByteOrder::LowFirst), first);
        }
    }

    #[test]
    fn residue_of_full_command_is_zero() {
        let full = crc16_full(b"123456789", ByteOrder::LowFirst);
        assert_eq!(crc16_value(&full), 0x0000);
    }
}
