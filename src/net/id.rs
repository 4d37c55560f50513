//! 标识符类型
//!
//! 定义链路两端的实体标识。

use serde::{Deserialize, Serialize};

use crate::sim::TimerOwner;

/// 实体标识：A 为发送端，B 为接收端。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityId {
    A,
    B,
}

impl EntityId {
    /// 对端实体（两实体网络中 packet 的目的地）
    pub fn peer(self) -> EntityId {
        match self {
            EntityId::A => EntityId::B,
            EntityId::B => EntityId::A,
        }
    }

    /// 用作数组下标
    pub fn index(self) -> usize {
        match self {
            EntityId::A => 0,
            EntityId::B => 1,
        }
    }

    /// 该实体在仿真器中的定时器归属
    pub fn timer_owner(self) -> TimerOwner {
        TimerOwner(self.index())
    }
}
