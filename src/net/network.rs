//! 不可靠信道
//!
//! 模拟 layer 3：按概率丢包、损坏，计算不乱序的到达时间并调度到达事件；
//! 同时承担 B 侧 layer 5 的交付（sink）。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::deliver_packet::DeliverPacket;
use super::id::EntityId;
use super::packet::{Message, Packet};
use super::stats::Stats;
use crate::corrupt::{Corruptor, SentinelCorruptor};
use crate::sim::{SimTime, Simulator};
use crate::viz::VizLogger;
use tracing::{debug, info, trace};

/// 最小单向时延（时间单位）
pub const MIN_DELAY_UNITS: f64 = 1.0;
/// 在最小时延之上叠加的均匀抖动范围（时间单位）
pub const JITTER_UNITS: f64 = 9.0;

/// 信道参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelConfig {
    pub loss_prob: f64,
    pub corrupt_prob: f64,
    pub seed: u64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            loss_prob: 0.0,
            corrupt_prob: 0.0,
            seed: 0,
        }
    }
}

/// 两实体之间的信道
pub struct Network {
    cfg: ChannelConfig,
    rng: StdRng,
    corruptor: Box<dyn Corruptor>,
    /// 每个目的实体最近一次调度的到达时间（保证不乱序）
    last_arrival: [SimTime; 2],
    /// 每个目的实体强制丢弃的剩余 packet 数
    forced_drops: [u32; 2],
    delivered: Vec<Message>,
    pub stats: Stats,
    pub viz: Option<VizLogger>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new(ChannelConfig::default())
    }
}

impl Network {
    pub fn new(cfg: ChannelConfig) -> Self {
        Self {
            cfg,
            rng: StdRng::seed_from_u64(cfg.seed),
            corruptor: Box::new(SentinelCorruptor),
            last_arrival: [SimTime::ZERO; 2],
            forced_drops: [0; 2],
            delivered: Vec::new(),
            stats: Stats::default(),
            viz: None,
        }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.cfg
    }

    /// 替换损坏策略
    pub fn set_corruptor(&mut self, corruptor: Box<dyn Corruptor>) {
        self.corruptor = corruptor;
    }

    /// 强制丢弃接下来发往 `dest` 的 `count` 个 packet（不消耗随机数）
    pub fn force_drop(&mut self, dest: EntityId, count: u32) {
        self.forced_drops[dest.index()] = self.forced_drops[dest.index()].saturating_add(count);
    }

    /// 发往 `dest` 的最近一次调度到达时间
    pub fn last_arrival(&self, dest: EntityId) -> SimTime {
        self.last_arrival[dest.index()]
    }

    /// B 已交付给上层的 message（按交付顺序）
    pub fn delivered(&self) -> &[Message] {
        &self.delivered
    }

    /// B 已交付字节的拼接
    pub fn delivered_bytes(&self) -> Vec<u8> {
        self.delivered
            .iter()
            .flat_map(|m| m.as_bytes().iter().copied())
            .collect()
    }

    fn uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// 把 packet 交给信道。目的地是 `from` 的对端。
    #[tracing::instrument(skip(self, pkt, sim), fields(seq = pkt.seqnum, ack = pkt.acknum))]
    pub fn submit(&mut self, from: EntityId, pkt: Packet, sim: &mut Simulator) {
        let dest = from.peer();
        let now = sim.now();
        self.stats.to_layer3 += 1;

        // 丢包
        let forced = self.forced_drops[dest.index()] > 0;
        if forced {
            self.forced_drops[dest.index()] -= 1;
        }
        if forced || self.uniform() < self.cfg.loss_prob {
            self.stats.lost += 1;
            debug!(?dest, forced, "🕳️  packet being lost");
            self.viz_lost(now, from, &pkt);
            return;
        }

        // 复制一份在途 packet，发送方之后对原 packet 的修改不影响它
        let mut in_flight = pkt.clone();

        // 不乱序：到达时间不早于该方向上最晚的在途 packet
        let start = now.max(self.last_arrival[dest.index()]);
        let delay = MIN_DELAY_UNITS + JITTER_UNITS * self.uniform();
        let arrive = start.saturating_add(SimTime::from_units_f64(delay));
        self.last_arrival[dest.index()] = arrive;

        trace!(
            now = ?now,
            start = ?start,
            delay,
            arrive = ?arrive,
            "计算到达时间"
        );

        // 损坏发生在到达时间确定之后，不影响时延
        if self.uniform() < self.cfg.corrupt_prob {
            let draw = self.uniform();
            let class = self.corruptor.corrupt(&mut in_flight, draw);
            self.stats.corrupted += 1;
            debug!(?dest, ?class, "⚡ packet being corrupted");
            self.viz_corrupted(now, from, &pkt, class);
        }

        debug!(arrive = ?arrive, to = ?dest, "调度 packet 到达事件");
        sim.schedule(
            arrive,
            DeliverPacket {
                to: dest,
                pkt: in_flight,
            },
        );
    }

    /// 把载荷交给 `at` 的上层
    pub(crate) fn deliver_up(&mut self, at: EntityId, seq: u32, msg: Message, now: SimTime) {
        info!(?at, seq, len = msg.len(), "✅ 数据交付上层");
        self.stats.delivered_msgs += 1;
        self.stats.delivered_bytes += msg.len() as u64;
        self.viz_delivered(now, at, seq, msg.len());
        self.delivered.push(msg);
    }
}
