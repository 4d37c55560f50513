//! A 侧上层数据源
//!
//! 把输入字节切成至多 20 字节的 message，到达间隔在 [0, 2λ] 上均匀分布（均值 λ）。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::packet::{Message, PAYLOAD_LEN};
use crate::sim::SimTime;

#[derive(Debug)]
pub struct MessageSource {
    data: Vec<u8>,
    offset: usize,
    mean_interval: f64,
    rng: StdRng,
}

impl Default for MessageSource {
    fn default() -> Self {
        Self::new(Vec::new(), 1.0, 0)
    }
}

impl MessageSource {
    pub fn new(data: Vec<u8>, mean_interval: f64, seed: u64) -> Self {
        Self {
            data,
            offset: 0,
            mean_interval,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 是否还有未读出的字节
    pub fn has_more(&self) -> bool {
        self.offset < self.data.len()
    }

    /// 读出下一个 message（最多 `PAYLOAD_LEN` 字节）
    pub fn next_message(&mut self) -> Option<Message> {
        if !self.has_more() {
            return None;
        }
        let end = (self.offset + PAYLOAD_LEN).min(self.data.len());
        let msg = Message::new(&self.data[self.offset..end]).ok()?;
        self.offset = end;
        Some(msg)
    }

    /// 下一次到达的间隔：U[0, 2λ]
    pub fn next_gap(&mut self) -> SimTime {
        let u: f64 = self.rng.gen_range(0.0..1.0);
        SimTime::from_units_f64(self.mean_interval * u * 2.0)
    }
}
