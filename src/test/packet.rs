use crate::error::GbnError;
use crate::net::{Message, Packet, PAYLOAD_LEN};

use super::msg;

#[test]
fn checksum_sums_header_and_all_payload_slots() {
    let m = msg(b"AB");
    let pkt = Packet::data(3, &m);
    assert_eq!(pkt.checksum, 3 + b'A' as u32 + b'B' as u32);
    assert_eq!(pkt.length, 2);
    assert_eq!(pkt.acknum, 0);

    // length 之外的字节同样计入
    let mut padded = pkt.clone();
    padded.payload[PAYLOAD_LEN - 1] = 7;
    assert!(!padded.verify());
    padded.checksum = padded.compute_checksum();
    assert!(padded.verify());
    assert_eq!(padded.checksum, pkt.checksum + 7);
}

#[test]
fn untouched_packets_verify() {
    let data = Packet::data(999, &msg(b"HELLO WORLD"));
    assert!(data.verify());
    assert!(data.is_intact());

    let ack = Packet::ack(999, &data);
    assert!(ack.verify());
    assert!(ack.is_intact());
    assert_eq!(ack.seqnum, 0);
    assert_eq!(ack.acknum, 999);
    assert_eq!(ack.payload, data.payload);
    assert_eq!(ack.length, data.length);
}

#[test]
fn checksum_does_not_cover_length_but_intact_does() {
    let mut pkt = Packet::data(1, &msg(b"xyz"));
    pkt.length = 21;
    assert!(pkt.verify());
    assert!(!pkt.is_intact());
}

#[test]
fn ack_mirroring_a_bad_length_stays_intact() {
    let mut bad = Packet::data(4, &msg(b"abc"));
    bad.length = 656_565;
    let ack = Packet::ack(3, &bad);
    assert_eq!(ack.length, PAYLOAD_LEN as u32);
    assert!(ack.is_intact());
}

#[test]
fn message_rejects_oversized_payload() {
    let err = Message::new(&[0u8; PAYLOAD_LEN + 1]).expect_err("too long");
    assert_eq!(
        err,
        GbnError::PayloadTooLong {
            len: PAYLOAD_LEN + 1,
            max: PAYLOAD_LEN
        }
    );
    assert!(Message::new(&[1u8; PAYLOAD_LEN]).is_ok());
    assert!(Message::new(&[]).expect("empty").is_empty());
}

#[test]
fn packet_message_returns_only_valid_bytes() {
    let mut pkt = Packet::data(0, &msg(b"HELLO"));
    pkt.payload[10] = b'!';
    let out = pkt.message();
    assert_eq!(out.as_bytes(), b"HELLO");
    assert_eq!(out, msg(b"HELLO"));
}
