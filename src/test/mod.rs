mod corrupt;
mod gbn_sender;
mod packet;

use crate::net::{EntityId, Message, NetApi, Packet};
use crate::sim::{SimTime, Simulator};

/// 记录实体输出但不调度任何事件的 NetApi，用于单独驱动状态机。
#[derive(Debug, Default)]
pub(crate) struct RecordingNet {
    pub sent: Vec<(EntityId, Packet)>,
    pub delivered: Vec<Message>,
    pub retransmitted: Vec<u32>,
    pub acks_seen: Vec<(u32, bool)>,
}

impl RecordingNet {
    pub fn seqs_from(&self, from: EntityId) -> Vec<u32> {
        self.sent
            .iter()
            .filter(|(who, _)| *who == from)
            .map(|(_, p)| p.seqnum)
            .collect()
    }

    pub fn acks_from_b(&self) -> Vec<u32> {
        self.sent
            .iter()
            .filter(|(who, _)| *who == EntityId::B)
            .map(|(_, p)| p.acknum)
            .collect()
    }
}

impl NetApi for RecordingNet {
    fn to_layer3(&mut self, from: EntityId, pkt: Packet, _sim: &mut Simulator) {
        self.sent.push((from, pkt));
    }

    fn to_layer5(&mut self, _at: EntityId, _seq: u32, msg: Message, _now: SimTime) {
        self.delivered.push(msg);
    }

    fn viz_send_data(&mut self, _now: SimTime, seq: u32, retrans: bool) {
        if retrans {
            self.retransmitted.push(seq);
        }
    }

    fn viz_send_ack(&mut self, _now: SimTime, _ack: u32, _dup: bool) {}

    fn viz_recv_ack(&mut self, _now: SimTime, ack: u32, accepted: bool) {
        self.acks_seen.push((ack, accepted));
    }
}

pub(crate) fn msg(bytes: &[u8]) -> Message {
    Message::new(bytes).expect("message fits")
}
