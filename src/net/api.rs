//! Network-facing API used by the GBN entities.

use crate::sim::{SimTime, Simulator};

use super::{EntityId, Message, Packet};

/// Minimal network API for protocol entities.
///
/// This is the only path between A and B: packets go down through
/// `to_layer3` and come back as later arrival events.
pub trait NetApi {
    /// Hand a packet to the unreliable channel; the destination is `from.peer()`.
    fn to_layer3(&mut self, from: EntityId, pkt: Packet, sim: &mut Simulator);
    /// Pass a validated payload up to layer 5 on `at`; `seq` is the packet it arrived in.
    fn to_layer5(&mut self, at: EntityId, seq: u32, msg: Message, now: SimTime);

    fn viz_send_data(&mut self, now: SimTime, seq: u32, retrans: bool);
    fn viz_send_ack(&mut self, now: SimTime, ack: u32, dup: bool);
    fn viz_recv_ack(&mut self, now: SimTime, ack: u32, accepted: bool);
}

impl NetApi for super::Network {
    fn to_layer3(&mut self, from: EntityId, pkt: Packet, sim: &mut Simulator) {
        super::Network::submit(self, from, pkt, sim)
    }

    fn to_layer5(&mut self, at: EntityId, seq: u32, msg: Message, now: SimTime) {
        super::Network::deliver_up(self, at, seq, msg, now)
    }

    fn viz_send_data(&mut self, now: SimTime, seq: u32, retrans: bool) {
        self.viz_send_data(now, seq, retrans)
    }

    fn viz_send_ack(&mut self, now: SimTime, ack: u32, dup: bool) {
        self.viz_send_ack(now, ack, dup)
    }

    fn viz_recv_ack(&mut self, now: SimTime, ack: u32, accepted: bool) {
        self.viz_recv_ack(now, ack, accepted)
    }
}
