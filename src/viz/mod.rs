//! 可视化事件记录（用于离线回放 / 测试断言）
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析文本日志
//! - **轻量**：只在内存中收集，仿真结束后一次性写出

mod types;

pub use types::{VizEvent, VizEventKind, VizLogger, VizMeta};
