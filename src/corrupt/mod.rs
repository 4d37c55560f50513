//! 损坏注入策略（Corruption strategies）
//!
//! 信道决定“是否损坏”，策略决定“怎么损坏”。默认的 `SentinelCorruptor`
//! 复现经典模拟器的四类损坏；测试可以换成确定性的 `FixedCorruptor`。

use serde::{Deserialize, Serialize};

use crate::net::Packet;

mod fixed;
mod sentinel;

pub use fixed::FixedCorruptor;
pub use sentinel::SentinelCorruptor;

/// 写入 seqnum / acknum 的越界哨兵值
pub const SEQ_SENTINEL: u32 = 999_999;
/// 写入 length 的非法哨兵值
pub const LENGTH_SENTINEL: u32 = 656_565;
/// 载荷损坏时写入第一个字节的值
pub const PAYLOAD_MARK: u8 = b'Z';

/// 损坏类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptionClass {
    Payload,
    Seqnum,
    Acknum,
    Length,
}

impl CorruptionClass {
    /// 就地修改 packet
    pub fn apply(self, pkt: &mut Packet) {
        match self {
            CorruptionClass::Payload => pkt.payload[0] = PAYLOAD_MARK,
            CorruptionClass::Seqnum => pkt.seqnum = SEQ_SENTINEL,
            CorruptionClass::Acknum => pkt.acknum = SEQ_SENTINEL,
            CorruptionClass::Length => pkt.length = LENGTH_SENTINEL,
        }
    }
}

/// 损坏策略抽象
pub trait Corruptor: std::fmt::Debug {
    /// 损坏 `pkt`。`draw` 是信道提供的 [0,1) 均匀随机数，策略可以忽略它。
    fn corrupt(&mut self, pkt: &mut Packet, draw: f64) -> CorruptionClass;
}
