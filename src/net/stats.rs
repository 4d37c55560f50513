//! 统计信息
//!
//! 定义信道与 layer 5 统计数据结构。

/// 信道 / 上层交付统计
#[derive(Debug, Default, Clone)]
pub struct Stats {
    /// 交给信道的 packet 数（含被丢弃的）
    pub to_layer3: u64,
    pub lost: u64,
    pub corrupted: u64,
    /// A 侧上层产生的 message 数
    pub msgs_from_layer5: u64,
    /// 因发送缓冲已满被拒绝的 message 数
    pub rejected_msgs: u64,
    pub delivered_msgs: u64,
    pub delivered_bytes: u64,
}
