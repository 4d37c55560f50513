//! Go-Back-N 接收端（B）
//!
//! 只接受下一个期望序号的完整 packet；其余一律回复上一个 ACK 的副本。
//! 没有 NAK，重复 ACK 是唯一的恢复信号。

use crate::net::{EntityId, NetApi, Packet};
use crate::sim::Simulator;
use tracing::{debug, trace};

use super::window::SeqSpace;
use super::GbnConfig;

#[derive(Debug, Default, Clone)]
pub struct ReceiverStats {
    pub accepted: u64,
    pub dup_acks: u64,
}

#[derive(Debug)]
pub struct GbnReceiver {
    space: SeqSpace,
    expected: u32,
    /// 最近一次发出的 ACK 序号；初始为 N-1，与第一个真实 ACK（0）区分
    last_ack: u32,
    stats: ReceiverStats,
}

impl GbnReceiver {
    /// `cfg` 须已通过 [`GbnConfig::validate`]。
    pub fn new(cfg: GbnConfig) -> Self {
        let space = SeqSpace::new(cfg.window, cfg.seq_space);
        Self {
            space,
            expected: 0,
            last_ack: cfg.seq_space - 1,
            stats: ReceiverStats::default(),
        }
    }

    pub fn expected(&self) -> u32 {
        self.expected
    }

    pub fn last_ack(&self) -> u32 {
        self.last_ack
    }

    pub fn stats(&self) -> &ReceiverStats {
        &self.stats
    }

    #[tracing::instrument(skip(self, pkt, net, sim), fields(seq = pkt.seqnum, expected = self.expected))]
    pub fn on_packet(&mut self, pkt: Packet, net: &mut dyn NetApi, sim: &mut Simulator) {
        let now = sim.now();

        if pkt.is_intact() && pkt.seqnum == self.expected {
            net.to_layer5(EntityId::B, pkt.seqnum, pkt.message(), now);

            let ack = Packet::ack(pkt.seqnum, &pkt);
            debug!(ack = ack.acknum, checksum = ack.checksum, "B: sending new ACK to A");
            net.viz_send_ack(now, ack.acknum, false);
            net.to_layer3(EntityId::B, ack, sim);

            self.last_ack = pkt.seqnum;
            self.expected = self.space.add(self.expected, 1);
            self.stats.accepted += 1;
        } else {
            let ack = Packet::ack(self.last_ack, &pkt);
            debug!(
                ack = ack.acknum,
                intact = pkt.is_intact(),
                "B: resending previous ACK to A"
            );
            net.viz_send_ack(now, ack.acknum, true);
            net.to_layer3(EntityId::B, ack, sim);
            self.stats.dup_acks += 1;
        }
    }

    /// B 从不启动定时器；保留该入口只为与 A 对称。
    pub fn on_timeout(&mut self, _net: &mut dyn NetApi, _sim: &mut Simulator) {
        trace!("B: timer fired, receiver keeps no retransmission state");
    }
}
