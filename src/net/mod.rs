//! 网络模拟模块
//!
//! 此模块包含两实体网络的组件：packet、不可靠信道、事件和仿真世界。

// 子模块声明
mod id;
mod packet;
mod api;
mod stats;
mod network;
mod network_viz;
mod deliver_packet;
mod timer_fired;
mod message_ready;
mod source;
mod gbn_world;

// 重新导出公共接口
pub use id::EntityId;
pub use packet::{Message, Packet, PAYLOAD_LEN};
pub use api::NetApi;
pub use stats::Stats;
pub use network::{ChannelConfig, Network, JITTER_UNITS, MIN_DELAY_UNITS};
pub use deliver_packet::DeliverPacket;
pub use timer_fired::{start_timer, stop_timer, TimerFired};
pub use message_ready::{MessageReady, SendMessage};
pub use source::MessageSource;
pub use gbn_world::GbnWorld;
