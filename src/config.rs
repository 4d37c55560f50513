//! 仿真配置
//!
//! 可以从 JSON 文件加载，再由命令行参数覆盖。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::proto::GbnConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// 丢包概率
    pub loss_prob: f64,
    /// 损坏概率
    pub corrupt_prob: f64,
    /// 上层 message 平均到达间隔 λ（时间单位）
    pub mean_interval: f64,
    pub seed: u64,
    pub gbn: GbnConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            loss_prob: 0.0,
            corrupt_prob: 0.0,
            mean_interval: 10.0,
            seed: 0,
            gbn: GbnConfig::default(),
        }
    }
}

impl SimConfig {
    /// 读取 JSON 配置文件（缺省字段取默认值）
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("loss probability", self.loss_prob)?;
        check_probability("corruption probability", self.corrupt_prob)?;
        if !(self.mean_interval > 0.0) {
            return Err(ConfigError::Interval(self.mean_interval));
        }
        self.gbn.validate()
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { name, value })
    }
}
