//! 传输层/协议模块
//!
//! Go-Back-N 的发送端（A）与接收端（B）状态机。

pub mod gbn_receiver;
pub mod gbn_sender;
pub mod window;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::SimTime;

/// GBN 参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GbnConfig {
    /// 发送窗口大小 W
    pub window: u32,
    /// 序号空间大小 N（序号取模 N，要求 N ≥ 2W）
    pub seq_space: u32,
    /// 重传超时（时间单位）
    pub rto: f64,
    /// 尚未发送的 message 缓冲上限
    pub max_backlog: usize,
}

impl Default for GbnConfig {
    fn default() -> Self {
        Self {
            window: 8,
            seq_space: 1000,
            rto: 20.0,
            max_backlog: 1000,
        }
    }
}

impl GbnConfig {
    pub fn rto_time(&self) -> SimTime {
        SimTime::from_units_f64(self.rto)
    }

    /// 检查协议参数：W ≥ 1，N ≥ 2W，RTO > 0，缓冲上限 ≥ 1。
    ///
    /// `GbnSender` / `GbnReceiver` 的构造函数假定参数已通过此检查。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rto > 0.0) {
            return Err(ConfigError::Timeout(self.rto));
        }
        if self.window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if (self.seq_space as u64) < 2 * self.window as u64 {
            return Err(ConfigError::SeqSpaceTooSmall {
                window: self.window,
                seq_space: self.seq_space,
            });
        }
        if self.max_backlog == 0 {
            return Err(ConfigError::ZeroBacklog);
        }
        Ok(())
    }
}
