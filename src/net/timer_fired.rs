//! 实体定时器事件
//!
//! 每个实体最多一个挂起的定时器，由仿真器保证。

use super::gbn_world::GbnWorld;
use super::id::EntityId;
use crate::sim::{Event, SimTime, Simulator, World};

/// 事件：`entity` 的定时器到期。
#[derive(Debug)]
pub struct TimerFired {
    pub entity: EntityId,
}

impl Event for TimerFired {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let TimerFired { entity } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<GbnWorld>()
            .expect("world must be GbnWorld");
        w.on_timer(entity, sim);
    }
}

/// 在 `increment` 之后启动 `entity` 的定时器；已在运行时告警并忽略。
pub fn start_timer(sim: &mut Simulator, entity: EntityId, increment: SimTime) -> bool {
    sim.start_timer(entity.timer_owner(), increment, TimerFired { entity })
}

/// 停止 `entity` 的定时器；未在运行时告警并返回 `false`。
pub fn stop_timer(sim: &mut Simulator, entity: EntityId) -> bool {
    sim.stop_timer(entity.timer_owner())
}
