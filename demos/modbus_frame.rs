use cmd_checksum::{parser, Algorithm, ByteOrder};

fn main() {
    // Read holding registers 0..10 from slave 1
    let request = Algorithm::MODBUS
        .append(&[0x01, 0x03, 0x00, 0x00, 0x00, 0x0A])
        .expect("Append failed");

    // Compare with the frame that should go on the wire
    let cmp = hex::decode("01030000000AC5CD").unwrap();
    assert_eq!(cmp, request);

    // Read it back as the slave would
    let (_, command) = parser::checked(Algorithm::MODBUS)(&request).unwrap();
    println!("{command:#?}");

    // A device that wants the high byte first rejects the same frame
    let high_first = Algorithm::Crc16 {
        order: ByteOrder::HighFirst,
    };
    println!("{:?}", high_first.verify(&request));
}
