//! GBN 仿真世界
//!
//! 持有信道与两个实体。A 与 B 是互不引用的独立字段，
//! 彼此只能通过信道上的 packet 交互。

use super::id::EntityId;
use super::message_ready::MessageReady;
use super::network::{ChannelConfig, Network};
use super::packet::{Message, Packet};
use super::source::MessageSource;
use crate::config::SimConfig;
use crate::proto::gbn_receiver::GbnReceiver;
use crate::proto::gbn_sender::GbnSender;
use crate::proto::GbnConfig;
use crate::sim::{Simulator, World};
use std::any::Any;
use tracing::warn;

pub struct GbnWorld {
    pub net: Network,
    pub a: GbnSender,
    pub b: GbnReceiver,
    pub source: MessageSource,
}

impl Default for GbnWorld {
    fn default() -> Self {
        Self::new(Network::default(), GbnConfig::default(), MessageSource::default())
    }
}

impl GbnWorld {
    /// `gbn` 须已通过 [`GbnConfig::validate`]。
    pub fn new(net: Network, gbn: GbnConfig, source: MessageSource) -> Self {
        Self {
            net,
            a: GbnSender::new(gbn.clone()),
            b: GbnReceiver::new(gbn),
            source,
        }
    }

    /// 按配置构建：信道与数据源使用同一 seed 派生的两个独立随机流。
    pub fn from_config(cfg: &SimConfig, input: Vec<u8>) -> Self {
        let net = Network::new(ChannelConfig {
            loss_prob: cfg.loss_prob,
            corrupt_prob: cfg.corrupt_prob,
            seed: cfg.seed,
        });
        let source = MessageSource::new(input, cfg.mean_interval, cfg.seed.wrapping_add(1));
        Self::new(net, cfg.gbn.clone(), source)
    }

    /// 调度数据源的第一次到达（无数据时什么都不做）
    pub fn start(&mut self, sim: &mut Simulator) {
        if self.source.has_more() {
            let at = sim.now().saturating_add(self.source.next_gap());
            sim.schedule(at, MessageReady);
        }
    }

    /// A 的上层交来一个 message
    pub(crate) fn on_message(&mut self, msg: Message, sim: &mut Simulator) {
        self.net.stats.msgs_from_layer5 += 1;
        if let Err(err) = self.a.output(msg, &mut self.net, sim) {
            warn!(%err, now = ?sim.now(), "message rejected by sender");
            self.net.stats.rejected_msgs += 1;
            self.net.viz_rejected(sim.now());
        }
    }

    pub(crate) fn on_packet(&mut self, to: EntityId, pkt: Packet, sim: &mut Simulator) {
        match to {
            EntityId::A => self.a.on_ack(pkt, &mut self.net, sim),
            EntityId::B => self.b.on_packet(pkt, &mut self.net, sim),
        }
    }

    pub(crate) fn on_timer(&mut self, entity: EntityId, sim: &mut Simulator) {
        self.net.viz_timeout(sim.now(), entity);
        match entity {
            EntityId::A => self.a.on_timeout(&mut self.net, sim),
            EntityId::B => self.b.on_timeout(&mut self.net, sim),
        }
    }
}

impl World for GbnWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
