//! Tests for the XOR checksum and its domain

mod common;

use common::*;

#[test]
fn test_checksum_known_value() {
    let packet = Packet::request_with_args(0x03, 0x83, &[0x01, 0x05, 0x00]).expect("builder failed");

    // 0x03 ^ 0x03 ^ 0x83 ^ 0x01 ^ 0x05 over the covered range
    assert_eq!(packet.checksum(), 0x87);
}

#[test]
fn test_checksum_is_deterministic() {
    let packet = Packet::request_with_args(0x07, 0x22, &[0x10, 0x20, 0x30]).expect("builder failed");
    assert_eq!(packet.checksum(), packet.checksum());
}

#[test]
fn test_checksum_covers_every_byte_in_domain() {
    let mut packet = Packet::request_with_args(0x03, 0x83, &[0x01, 0x05, 0x00]).expect("builder failed");
    packet.set_status(Status::Success);
    let baseline = packet.checksum();

    for offset in CHECKSUM_START..CHECKSUM_END {
        let mut wire = packet.as_wire().to_vec();
        wire[offset] ^= 0xFF;
        let mutated = Packet::from_wire(&wire).expect("mutated wire image should still parse");
        assert_ne!(
            mutated.checksum(),
            baseline,
            "flipping covered byte {offset} must change the checksum"
        );
    }
}

#[test]
fn test_checksum_ignores_uncovered_bytes() {
    let packet = Packet::request_with_args(0x03, 0x83, &[0x01, 0x05, 0x00]).expect("builder failed");
    let baseline = packet.checksum();

    // status, transaction_id, crc, reserved sit outside the domain
    for offset in [0usize, 1, 88, 89] {
        let mut wire = packet.as_wire().to_vec();
        wire[offset] ^= 0xFF;
        let mutated = Packet::from_wire(&wire).expect("mutated wire image should still parse");
        assert_eq!(
            mutated.checksum(),
            baseline,
            "flipping uncovered byte {offset} must not change the checksum"
        );
    }
}

#[test]
fn test_stamp_checksum_writes_crc() {
    let mut packet = Packet::request_with_args(0x03, 0x83, &[0x01, 0x05, 0x00]).expect("builder failed");
    assert_eq!(packet.crc, 0, "builder leaves crc unset");

    packet.stamp_checksum();
    assert_eq!(packet.crc, 0x87);

    // stamping again is a fixed point: crc is outside its own domain
    packet.stamp_checksum();
    assert_eq!(packet.crc, 0x87);
}
