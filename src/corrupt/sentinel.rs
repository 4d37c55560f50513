//! 经典四类哨兵损坏
//!
//! 按 `draw` 选择类别：载荷 75%，seqnum 10%，acknum 7.5%，length 7.5%。

use crate::net::Packet;

use super::{CorruptionClass, Corruptor};

#[derive(Debug, Default, Clone, Copy)]
pub struct SentinelCorruptor;

impl SentinelCorruptor {
    /// `draw` 到类别的映射
    pub fn classify(draw: f64) -> CorruptionClass {
        if draw < 0.75 {
            CorruptionClass::Payload
        } else if draw < 0.85 {
            CorruptionClass::Seqnum
        } else if draw < 0.925 {
            CorruptionClass::Acknum
        } else {
            CorruptionClass::Length
        }
    }
}

impl Corruptor for SentinelCorruptor {
    fn corrupt(&mut self, pkt: &mut Packet, draw: f64) -> CorruptionClass {
        let class = Self::classify(draw);
        class.apply(pkt);
        class
    }
}
