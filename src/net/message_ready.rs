//! 上层 message 到达 A 的事件

use super::gbn_world::GbnWorld;
use super::packet::Message;
use crate::sim::{Event, Simulator, World};
use tracing::debug;

/// 事件：从 `MessageSource` 取下一个 message 交给 A，并在还有数据时调度下一次到达。
#[derive(Debug)]
pub struct MessageReady;

impl Event for MessageReady {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = world
            .as_any_mut()
            .downcast_mut::<GbnWorld>()
            .expect("world must be GbnWorld");

        let Some(msg) = w.source.next_message() else {
            debug!("message source exhausted");
            return;
        };
        if w.source.has_more() {
            let at = sim.now().saturating_add(w.source.next_gap());
            sim.schedule(at, MessageReady);
        }
        w.on_message(msg, sim);
    }
}

/// 事件：把一个指定的 message 交给 A（脚本化注入，不经过 source）。
#[derive(Debug)]
pub struct SendMessage {
    pub msg: Message,
}

impl Event for SendMessage {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let SendMessage { msg } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<GbnWorld>()
            .expect("world must be GbnWorld");
        w.on_message(msg, sim);
    }
}
