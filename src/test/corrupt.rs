use crate::corrupt::{
    CorruptionClass, Corruptor, FixedCorruptor, SentinelCorruptor, LENGTH_SENTINEL, SEQ_SENTINEL,
};
use crate::net::Packet;

use super::msg;

#[test]
fn sentinel_classification_follows_cumulative_thresholds() {
    assert_eq!(SentinelCorruptor::classify(0.0), CorruptionClass::Payload);
    assert_eq!(SentinelCorruptor::classify(0.749), CorruptionClass::Payload);
    assert_eq!(SentinelCorruptor::classify(0.75), CorruptionClass::Seqnum);
    assert_eq!(SentinelCorruptor::classify(0.849), CorruptionClass::Seqnum);
    assert_eq!(SentinelCorruptor::classify(0.85), CorruptionClass::Acknum);
    assert_eq!(SentinelCorruptor::classify(0.924), CorruptionClass::Acknum);
    assert_eq!(SentinelCorruptor::classify(0.925), CorruptionClass::Length);
    assert_eq!(SentinelCorruptor::classify(0.999), CorruptionClass::Length);
}

#[test]
fn header_corruption_is_always_detected() {
    for class in [
        CorruptionClass::Seqnum,
        CorruptionClass::Acknum,
        CorruptionClass::Length,
    ] {
        for seq in [0, 1, 17, 998] {
            let mut data = Packet::data(seq, &msg(b"payload"));
            class.apply(&mut data);
            assert!(!data.is_intact(), "{class:?} on data seq {seq} went unnoticed");

            let mut ack = Packet::ack(seq, &Packet::data(seq, &msg(b"payload")));
            class.apply(&mut ack);
            assert!(!ack.is_intact(), "{class:?} on ack {seq} went unnoticed");
        }
    }
}

#[test]
fn payload_corruption_is_detected_unless_byte_already_marked() {
    let mut pkt = Packet::data(5, &msg(b"HELLO"));
    CorruptionClass::Payload.apply(&mut pkt);
    assert!(!pkt.is_intact());

    // 首字节本来就是 'Z'：包未变化，校验仍然通过
    let mut same = Packet::data(5, &msg(b"ZEBRA"));
    CorruptionClass::Payload.apply(&mut same);
    assert!(same.is_intact());
    assert_eq!(same, Packet::data(5, &msg(b"ZEBRA")));
}

#[test]
fn sentinel_values_are_out_of_range() {
    let mut pkt = Packet::data(0, &msg(b"a"));
    SentinelCorruptor.corrupt(&mut pkt, 0.8);
    assert_eq!(pkt.seqnum, SEQ_SENTINEL);

    let mut pkt = Packet::data(0, &msg(b"a"));
    SentinelCorruptor.corrupt(&mut pkt, 0.9);
    assert_eq!(pkt.acknum, SEQ_SENTINEL);

    let mut pkt = Packet::data(0, &msg(b"a"));
    SentinelCorruptor.corrupt(&mut pkt, 0.95);
    assert_eq!(pkt.length, LENGTH_SENTINEL);
}

#[test]
fn fixed_corruptor_cycles_and_ignores_draw() {
    let mut c = FixedCorruptor::new(vec![CorruptionClass::Acknum, CorruptionClass::Length]);
    let mut pkt = Packet::data(0, &msg(b"a"));
    assert_eq!(c.corrupt(&mut pkt, 0.0), CorruptionClass::Acknum);
    assert_eq!(c.corrupt(&mut pkt, 0.0), CorruptionClass::Length);
    assert_eq!(c.corrupt(&mut pkt, 0.99), CorruptionClass::Acknum);

    let mut empty = FixedCorruptor::new(Vec::new());
    assert_eq!(empty.corrupt(&mut pkt, 0.5), CorruptionClass::Payload);
}
