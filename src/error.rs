//! 错误类型

use std::path::PathBuf;

/// 协议实体对上层报告的错误
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GbnError {
    /// 发送缓冲已满；message 未被接收
    #[error("outbound backlog is full ({capacity} messages)")]
    BacklogFull { capacity: usize },

    #[error("message payload of {len} bytes exceeds the {max}-byte limit")]
    PayloadTooLong { len: usize, max: usize },
}

/// 配置加载 / 校验错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("mean message interval must be positive, got {0}")]
    Interval(f64),

    #[error("retransmission timeout must be positive, got {0}")]
    Timeout(f64),

    #[error("window size must be at least 1")]
    ZeroWindow,

    #[error("sequence space {seq_space} must be at least twice the window size {window}")]
    SeqSpaceTooSmall { window: u32, seq_space: u32 },

    #[error("outbound backlog capacity must be at least 1")]
    ZeroBacklog,

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
