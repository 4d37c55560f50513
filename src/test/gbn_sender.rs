use crate::corrupt::CorruptionClass;
use crate::error::GbnError;
use crate::net::{EntityId, Packet};
use crate::proto::gbn_sender::GbnSender;
use crate::proto::GbnConfig;
use crate::sim::Simulator;

use super::{msg, RecordingNet};

fn sender(window: u32, seq_space: u32) -> GbnSender {
    GbnSender::new(GbnConfig {
        window,
        seq_space,
        ..GbnConfig::default()
    })
}

fn ack(acknum: u32) -> Packet {
    Packet::ack(acknum, &Packet::data(acknum, &msg(b"ack")))
}

fn a_timer(sim: &Simulator) -> bool {
    sim.timer_pending(EntityId::A.timer_owner())
}

#[test]
fn first_message_is_sent_with_seq_zero_and_starts_timer() {
    let mut sim = Simulator::default();
    let mut net = RecordingNet::default();
    let mut a = sender(8, 1000);

    a.output(msg(b"HELLO WORLD"), &mut net, &mut sim).expect("accepted");

    assert_eq!(net.sent.len(), 1);
    let (from, pkt) = &net.sent[0];
    assert_eq!(*from, EntityId::A);
    assert_eq!(pkt.seqnum, 0);
    assert_eq!(pkt.acknum, 0);
    assert_eq!(pkt.length, 11);
    assert!(pkt.is_intact());
    assert_eq!(&pkt.payload[..11], b"HELLO WORLD");
    assert!(a_timer(&sim));
    assert_eq!((a.base(), a.next_seq(), a.in_flight()), (0, 1, 1));
}

#[test]
fn back_to_back_messages_both_fit_and_cumulative_ack_slides_base() {
    let mut sim = Simulator::default();
    let mut net = RecordingNet::default();
    let mut a = sender(8, 1000);

    a.output(msg(b"one"), &mut net, &mut sim).expect("accepted");
    a.output(msg(b"two"), &mut net, &mut sim).expect("accepted");
    assert_eq!(net.seqs_from(EntityId::A), vec![0, 1]);
    // 第二个 packet 不会重复启动定时器
    assert_eq!(sim.pending_events(), 1);

    a.on_ack(ack(1), &mut net, &mut sim);
    assert_eq!(a.base(), 2);
    assert_eq!(a.in_flight(), 0);
    assert!(!a_timer(&sim));
    assert!(a.is_idle());
    assert_eq!(net.acks_seen, vec![(1, true)]);
}

#[test]
fn full_window_buffers_bursty_arrivals_in_fifo_order() {
    let mut sim = Simulator::default();
    let mut net = RecordingNet::default();
    let mut a = sender(4, 16);

    for i in 0..10u8 {
        a.output(msg(&[b'a' + i]), &mut net, &mut sim).expect("accepted");
    }
    assert_eq!(net.seqs_from(EntityId::A), vec![0, 1, 2, 3]);
    assert_eq!(a.in_flight(), 4);
    assert_eq!(a.backlog_len(), 6);

    // ACK 1 释放两个槽位，依次发出 e、f
    a.on_ack(ack(1), &mut net, &mut sim);
    assert_eq!(a.base(), 2);
    let sent: Vec<(u32, u8)> = net
        .sent
        .iter()
        .map(|(_, p)| (p.seqnum, p.payload[0]))
        .collect();
    assert_eq!(
        sent,
        vec![(0, b'a'), (1, b'b'), (2, b'c'), (3, b'd'), (4, b'e'), (5, b'f')]
    );
    assert_eq!(a.in_flight(), 4);
    assert_eq!(a.backlog_len(), 4);
    assert!(a_timer(&sim));
    assert!(a.stats().max_in_flight <= 4);
}

#[test]
fn backlog_overflow_is_reported_and_leaves_state_unchanged() {
    let mut sim = Simulator::default();
    let mut net = RecordingNet::default();
    let mut a = GbnSender::new(GbnConfig {
        window: 2,
        seq_space: 8,
        max_backlog: 3,
        ..GbnConfig::default()
    });

    // 2 个在途 + 3 个缓冲
    for _ in 0..5 {
        a.output(msg(b"x"), &mut net, &mut sim).expect("accepted");
    }
    let err = a.output(msg(b"y"), &mut net, &mut sim).expect_err("backlog full");
    assert_eq!(err, GbnError::BacklogFull { capacity: 3 });
    assert_eq!(a.backlog_len(), 3);
    assert_eq!(a.in_flight(), 2);
    assert_eq!(net.sent.len(), 2);
}

#[test]
fn corrupt_and_out_of_window_acks_are_discarded() {
    let mut sim = Simulator::default();
    let mut net = RecordingNet::default();
    let mut a = sender(8, 1000);
    a.output(msg(b"one"), &mut net, &mut sim).expect("accepted");
    a.output(msg(b"two"), &mut net, &mut sim).expect("accepted");

    for class in [
        CorruptionClass::Payload,
        CorruptionClass::Seqnum,
        CorruptionClass::Acknum,
        CorruptionClass::Length,
    ] {
        let mut bad = ack(0);
        class.apply(&mut bad);
        a.on_ack(bad, &mut net, &mut sim);
    }
    // 接收端的初始 ACK（N-1）不在窗口内
    a.on_ack(ack(999), &mut net, &mut sim);
    a.on_ack(ack(8), &mut net, &mut sim);

    assert_eq!(a.base(), 0);
    assert_eq!(a.in_flight(), 2);
    assert_eq!(a.stats().acks_rejected, 6);
    assert!(a_timer(&sim));
    // 丢弃 ACK 不触发重传
    assert_eq!(net.sent.len(), 2);
}

#[test]
fn ack_for_unsent_sequence_number_is_discarded() {
    let mut sim = Simulator::default();
    let mut net = RecordingNet::default();
    let mut a = sender(8, 1000);
    a.output(msg(b"one"), &mut net, &mut sim).expect("accepted");

    a.on_ack(ack(5), &mut net, &mut sim);
    assert_eq!(a.base(), 0);
    assert_eq!(a.in_flight(), 1);
    assert_eq!(net.acks_seen, vec![(5, false)]);
}

#[test]
fn duplicate_ack_after_slide_is_stale() {
    let mut sim = Simulator::default();
    let mut net = RecordingNet::default();
    let mut a = sender(8, 1000);
    a.output(msg(b"one"), &mut net, &mut sim).expect("accepted");
    a.output(msg(b"two"), &mut net, &mut sim).expect("accepted");

    a.on_ack(ack(0), &mut net, &mut sim);
    a.on_ack(ack(0), &mut net, &mut sim);
    assert_eq!(a.base(), 1);
    assert_eq!(a.stats().acks_accepted, 1);
    assert_eq!(a.stats().acks_rejected, 1);
    assert!(a_timer(&sim));
}

#[test]
fn timeout_retransmits_whole_window_in_order_and_restarts_timer() {
    let mut sim = Simulator::default();
    let mut net = RecordingNet::default();
    let mut a = sender(4, 16);
    for i in 0..6u8 {
        a.output(msg(&[i]), &mut net, &mut sim).expect("accepted");
    }
    a.on_ack(ack(0), &mut net, &mut sim);
    net.sent.clear();

    // 模拟定时器触发：仿真器出队时会先清掉挂起状态
    assert!(sim.stop_timer(EntityId::A.timer_owner()));
    a.on_timeout(&mut net, &mut sim);

    assert_eq!(net.seqs_from(EntityId::A), vec![1, 2, 3, 4]);
    assert_eq!(net.retransmitted, vec![1, 2, 3, 4]);
    assert!(net.sent.iter().all(|(_, p)| p.is_intact()));
    assert_eq!(a.stats().retransmissions, 4);
    assert!(a_timer(&sim));
    // 缓冲中的 message 不会因超时被发送
    assert_eq!(a.backlog_len(), 1);
}

#[test]
fn timeout_with_nothing_outstanding_does_not_restart_timer() {
    let mut sim = Simulator::default();
    let mut net = RecordingNet::default();
    let mut a = sender(8, 1000);

    a.on_timeout(&mut net, &mut sim);
    assert!(net.sent.is_empty());
    assert!(!a_timer(&sim));
    assert_eq!(a.stats().timeouts, 1);
}

#[test]
fn sequence_numbers_wrap_around_the_sequence_space() {
    let mut sim = Simulator::default();
    let mut net = RecordingNet::default();
    let mut a = sender(2, 4);

    for i in 0..6u8 {
        a.output(msg(&[i]), &mut net, &mut sim).expect("accepted");
    }
    a.on_ack(ack(1), &mut net, &mut sim);
    a.on_ack(ack(3), &mut net, &mut sim);
    assert_eq!(a.base(), 0);
    a.on_ack(ack(0), &mut net, &mut sim);
    assert_eq!(a.base(), 1);

    assert_eq!(net.seqs_from(EntityId::A), vec![0, 1, 2, 3, 0, 1]);
    let payloads: Vec<u8> = net.sent.iter().map(|(_, p)| p.payload[0]).collect();
    assert_eq!(payloads, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(a.in_flight(), 1);
}
