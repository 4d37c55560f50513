//! Go-Back-N 发送端（A）
//!
//! - 最多 W 个未确认 packet 同时在途；窗口满时上层 message 进入缓冲（静默背压）
//! - 累计确认：ACK `k` 表示 `k` 及之前的序号都已收到
//! - 超时重传整个窗口 `[base, next)`，而不仅是最早的 packet
//!
//! 定时器不变量：有 packet 在途 ⟺ A 的定时器处于挂起状态。

use std::collections::VecDeque;

use crate::error::GbnError;
use crate::net::{start_timer, stop_timer, EntityId, Message, NetApi, Packet};
use crate::sim::{SimTime, Simulator};
use tracing::{debug, info, trace, warn};

use super::window::SeqSpace;
use super::GbnConfig;

/// 发送端计数器
#[derive(Debug, Default, Clone)]
pub struct SenderStats {
    /// 首次发送的数据包
    pub sent: u64,
    pub retransmissions: u64,
    pub timeouts: u64,
    pub acks_accepted: u64,
    /// 损坏、过期或重复的 ACK
    pub acks_rejected: u64,
    /// 观察到的最大在途数
    pub max_in_flight: usize,
}

#[derive(Debug)]
pub struct GbnSender {
    cfg: GbnConfig,
    space: SeqSpace,
    rto: SimTime,
    /// 最早未确认的序号
    base: u32,
    /// 下一个新 packet 使用的序号
    next: u32,
    /// 已到达但尚未发送的 message（FIFO）
    backlog: VecDeque<Message>,
    /// `[base, next)` 的已发送未确认 packet，按序号排列，用于重传
    in_flight: VecDeque<Packet>,
    stats: SenderStats,
}

impl GbnSender {
    /// `cfg` 须已通过 [`GbnConfig::validate`]。
    pub fn new(cfg: GbnConfig) -> Self {
        let space = SeqSpace::new(cfg.window, cfg.seq_space);
        let rto = cfg.rto_time();
        Self {
            space,
            rto,
            base: 0,
            next: 0,
            backlog: VecDeque::new(),
            in_flight: VecDeque::with_capacity(cfg.window as usize),
            stats: SenderStats::default(),
            cfg,
        }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn next_seq(&self) -> u32 {
        self.next
    }

    /// 已发送未确认的 packet 数
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// 在途 packet（按序号）
    pub fn outstanding(&self) -> impl Iterator<Item = &Packet> {
        self.in_flight.iter()
    }

    /// 等待窗口空位的 message 数
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    pub fn stats(&self) -> &SenderStats {
        &self.stats
    }

    /// 所有交来的 message 都已被确认
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty() && self.backlog.is_empty()
    }

    /// 上层交来一个 message。
    ///
    /// 先追加到缓冲，再尽量填满窗口；若窗口原本为空则启动定时器。
    /// 缓冲已满时拒绝该 message，状态不变。
    #[tracing::instrument(skip(self, msg, net, sim), fields(len = msg.len(), base = self.base, next = self.next))]
    pub fn output(
        &mut self,
        msg: Message,
        net: &mut dyn NetApi,
        sim: &mut Simulator,
    ) -> Result<(), GbnError> {
        if self.backlog.len() >= self.cfg.max_backlog {
            return Err(GbnError::BacklogFull {
                capacity: self.cfg.max_backlog,
            });
        }
        debug!(data = %String::from_utf8_lossy(msg.as_bytes()), "A: receiving MSG from above");

        let was_empty = self.in_flight.is_empty();
        self.backlog.push_back(msg);
        let sent = self.fill_window(net, sim);
        if sent == 0 {
            trace!(backlog = self.backlog.len(), "窗口已满，message 进入缓冲");
        }
        if was_empty && !self.in_flight.is_empty() {
            start_timer(sim, EntityId::A, self.rto);
        }
        Ok(())
    }

    /// ACK 到达。
    #[tracing::instrument(skip(self, pkt, net, sim), fields(ack = pkt.acknum, base = self.base))]
    pub fn on_ack(&mut self, pkt: Packet, net: &mut dyn NetApi, sim: &mut Simulator) {
        let acknum = pkt.acknum;
        let now = sim.now();

        if !pkt.is_intact()
            || !self.space.contains(acknum)
            || !self.space.is_within_window(self.base, acknum)
        {
            debug!(pending = self.base, "A: rejecting ACK");
            self.stats.acks_rejected += 1;
            net.viz_recv_ack(now, acknum, false);
            return;
        }

        let shift = self.space.distance(self.base, acknum) as usize + 1;
        if shift > self.in_flight.len() {
            // 窗口内但超出 next：确认了从未发送的序号
            warn!(next = self.next, "A: ACK for a sequence number that was never sent");
            self.stats.acks_rejected += 1;
            net.viz_recv_ack(now, acknum, false);
            return;
        }

        debug!(shift, "A: accepting ACK");
        self.stats.acks_accepted += 1;
        net.viz_recv_ack(now, acknum, true);

        stop_timer(sim, EntityId::A);
        self.in_flight.drain(..shift);
        self.base = self.space.add(acknum, 1);

        self.fill_window(net, sim);
        if !self.in_flight.is_empty() {
            start_timer(sim, EntityId::A, self.rto);
        }
        debug_assert_eq!(
            self.space.distance(self.base, self.next) as usize,
            self.in_flight.len()
        );
    }

    /// 定时器到期：按序重传 `[base, next)` 的全部 packet，然后重启定时器。
    #[tracing::instrument(skip(self, net, sim), fields(base = self.base, next = self.next))]
    pub fn on_timeout(&mut self, net: &mut dyn NetApi, sim: &mut Simulator) {
        self.stats.timeouts += 1;
        if self.in_flight.is_empty() {
            debug!("A: timer fired with nothing outstanding");
            return;
        }

        info!(count = self.in_flight.len(), "⏰ A: go-back-N retransmission");
        let now = sim.now();
        for pkt in self.in_flight.iter() {
            debug!(seq = pkt.seqnum, "A: resending DATA to B");
            net.viz_send_data(now, pkt.seqnum, true);
            net.to_layer3(EntityId::A, pkt.clone(), sim);
            self.stats.retransmissions += 1;
        }
        start_timer(sim, EntityId::A, self.rto);
    }

    /// 从缓冲中按 FIFO 取 message 填满窗口，返回本次新发送的数量。
    fn fill_window(&mut self, net: &mut dyn NetApi, sim: &mut Simulator) -> usize {
        let mut sent = 0;
        while self.in_flight.len() < self.space.window() as usize {
            let Some(msg) = self.backlog.pop_front() else {
                break;
            };
            let pkt = Packet::data(self.next, &msg);
            debug!(
                seq = pkt.seqnum,
                checksum = pkt.checksum,
                len = pkt.length,
                "A: sending new DATA to B"
            );
            net.viz_send_data(sim.now(), pkt.seqnum, false);
            net.to_layer3(EntityId::A, pkt.clone(), sim);
            self.in_flight.push_back(pkt);
            self.next = self.space.add(self.next, 1);
            self.stats.sent += 1;
            sent += 1;
        }
        self.stats.max_in_flight = self.stats.max_in_flight.max(self.in_flight.len());
        sent
    }
}
