use serde::{Deserialize, Serialize};

use crate::corrupt::CorruptionClass;
use crate::net::EntityId;

/// 可视化事件类型
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizEventKind {
    /// 仿真参数（作为 t=0 的第一条事件）
    Meta(VizMeta),
    /// A 发送数据包（retrans 表示超时重传）
    SendData { retrans: bool },
    /// B 发送 ACK（dup 表示重复确认上一个序号）
    SendAck { dup: bool },
    /// A 收到 ACK 并判定是否接受
    RecvAck { accepted: bool },
    /// 实体定时器触发
    Timeout,
    /// 信道丢包
    Lost,
    /// 信道损坏
    Corrupted { class: CorruptionClass },
    /// packet 到达目的实体
    Arrive,
    /// B 把载荷交给上层（序号记在 `VizEvent::seq`）
    Delivered { len: usize },
    /// A 的发送缓冲已满，上层 message 被拒绝
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VizMeta {
    pub loss_prob: f64,
    pub corrupt_prob: f64,
    pub window: u32,
    pub seq_space: u32,
    pub rto: f64,
}

/// 一个可回放的事件（JSON）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VizEvent {
    /// 仿真时间（时间单位）
    pub t: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ack: Option<u32>,
    #[serde(flatten)]
    pub kind: VizEventKind,
}

/// 一个简单的事件收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct VizLogger {
    pub events: Vec<VizEvent>,
}

impl VizLogger {
    pub fn push(&mut self, ev: VizEvent) {
        self.events.push(ev);
    }

    /// 按类型筛选
    pub fn filter<'a>(
        &'a self,
        pred: impl Fn(&VizEventKind) -> bool + 'a,
    ) -> impl Iterator<Item = &'a VizEvent> + 'a {
        self.events.iter().filter(move |ev| pred(&ev.kind))
    }
}
