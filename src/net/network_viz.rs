//! Visualization hooks for the channel.

use crate::corrupt::CorruptionClass;
use crate::sim::SimTime;
use crate::viz::{VizEvent, VizEventKind, VizMeta};

use super::{EntityId, Network, Packet};

impl Network {
    fn viz_push(&mut self, ev: VizEvent) {
        if let Some(v) = &mut self.viz {
            v.push(ev);
        }
    }

    fn viz_event(
        &mut self,
        now: SimTime,
        entity: Option<EntityId>,
        seq: Option<u32>,
        ack: Option<u32>,
        kind: VizEventKind,
    ) {
        if self.viz.is_none() {
            return;
        }
        self.viz_push(VizEvent {
            t: now.as_units_f64(),
            entity,
            seq,
            ack,
            kind,
        });
    }

    /// 写出 t=0 的参数事件
    pub fn emit_viz_meta(&mut self, window: u32, seq_space: u32, rto: f64) {
        let meta = VizMeta {
            loss_prob: self.config().loss_prob,
            corrupt_prob: self.config().corrupt_prob,
            window,
            seq_space,
            rto,
        };
        self.viz_event(SimTime::ZERO, None, None, None, VizEventKind::Meta(meta));
    }

    pub(crate) fn viz_send_data(&mut self, now: SimTime, seq: u32, retrans: bool) {
        self.viz_event(
            now,
            Some(EntityId::A),
            Some(seq),
            None,
            VizEventKind::SendData { retrans },
        );
    }

    pub(crate) fn viz_send_ack(&mut self, now: SimTime, ack: u32, dup: bool) {
        self.viz_event(
            now,
            Some(EntityId::B),
            None,
            Some(ack),
            VizEventKind::SendAck { dup },
        );
    }

    pub(crate) fn viz_recv_ack(&mut self, now: SimTime, ack: u32, accepted: bool) {
        self.viz_event(
            now,
            Some(EntityId::A),
            None,
            Some(ack),
            VizEventKind::RecvAck { accepted },
        );
    }

    pub(crate) fn viz_timeout(&mut self, now: SimTime, entity: EntityId) {
        self.viz_event(now, Some(entity), None, None, VizEventKind::Timeout);
    }

    pub(crate) fn viz_rejected(&mut self, now: SimTime) {
        self.viz_event(now, Some(EntityId::A), None, None, VizEventKind::Rejected);
    }

    pub(crate) fn viz_lost(&mut self, now: SimTime, from: EntityId, pkt: &Packet) {
        self.viz_event(
            now,
            Some(from),
            Some(pkt.seqnum),
            Some(pkt.acknum),
            VizEventKind::Lost,
        );
    }

    pub(crate) fn viz_corrupted(
        &mut self,
        now: SimTime,
        from: EntityId,
        pkt: &Packet,
        class: CorruptionClass,
    ) {
        self.viz_event(
            now,
            Some(from),
            Some(pkt.seqnum),
            Some(pkt.acknum),
            VizEventKind::Corrupted { class },
        );
    }

    pub(crate) fn viz_arrive(&mut self, now: SimTime, to: EntityId, pkt: &Packet) {
        self.viz_event(
            now,
            Some(to),
            Some(pkt.seqnum),
            Some(pkt.acknum),
            VizEventKind::Arrive,
        );
    }

    pub(crate) fn viz_delivered(&mut self, now: SimTime, at: EntityId, seq: u32, len: usize) {
        self.viz_event(
            now,
            Some(at),
            Some(seq),
            None,
            VizEventKind::Delivered { len },
        );
    }
}
