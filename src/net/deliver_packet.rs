//! 数据包到达事件
//!
//! 信道为每个未丢失的 packet 调度一个到达事件。

use super::gbn_world::GbnWorld;
use super::id::EntityId;
use super::packet::Packet;
use crate::sim::{Event, Simulator, World};
use tracing::{debug, trace};

/// 事件：把一个 packet 交给目的实体处理。
#[derive(Debug)]
pub struct DeliverPacket {
    pub to: EntityId,
    pub pkt: Packet,
}

impl Event for DeliverPacket {
    #[tracing::instrument(skip(self, sim, world), fields(to = ?self.to, seq = self.pkt.seqnum, ack = self.pkt.acknum))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let DeliverPacket { to, pkt } = *self;

        debug!(
            checksum = pkt.checksum,
            length = pkt.length,
            now = ?sim.now(),
            "📨 packet 到达实体"
        );

        let w = world
            .as_any_mut()
            .downcast_mut::<GbnWorld>()
            .expect("world must be GbnWorld");
        w.net.viz_arrive(sim.now(), to, &pkt);
        w.on_packet(to, pkt, sim);

        trace!("DeliverPacket::execute 完成");
    }
}
