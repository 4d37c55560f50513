//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间、事件队列以及每个实体的单一定时器。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::{debug, info, trace, warn};

/// 定时器归属者。每个归属者同一时刻最多只有一个挂起的定时器。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerOwner(pub usize);

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
    /// 已取消但仍留在堆中的事件（出队时丢弃）
    cancelled: HashSet<u64>,
    /// owner -> 挂起定时器的 seq
    timers: HashMap<TimerOwner, u64>,
    executed: u64,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 已执行的事件总数（不含被取消的事件）
    pub fn executed_events(&self) -> u64 {
        self.executed
    }

    /// 队列中仍有效的事件数量
    pub fn pending_events(&self) -> usize {
        self.q.len().saturating_sub(self.cancelled.len())
    }

    /// 调度事件在指定时间执行；早于当前时间的请求按当前时间处理。
    #[tracing::instrument(skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = ?at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        self.push(at, None, Box::new(ev));
    }

    /// 在 `now + delay` 启动 `owner` 的定时器。
    ///
    /// 若该 owner 已有挂起的定时器，则告警并忽略本次调用（不重置、不重复），返回 `false`。
    pub fn start_timer<E: Event>(&mut self, owner: TimerOwner, delay: SimTime, ev: E) -> bool {
        if self.timers.contains_key(&owner) {
            warn!(?owner, now = ?self.now, "attempt to start a timer that is already started");
            return false;
        }
        let at = self.now.saturating_add(delay);
        let seq = self.push(at, Some(owner), Box::new(ev));
        self.timers.insert(owner, seq);
        trace!(?owner, fire_at = ?at, "定时器已启动");
        true
    }

    /// 取消 `owner` 的挂起定时器。没有挂起的定时器时告警并返回 `false`。
    pub fn stop_timer(&mut self, owner: TimerOwner) -> bool {
        match self.timers.remove(&owner) {
            Some(seq) => {
                self.cancelled.insert(seq);
                trace!(?owner, seq, "定时器已取消");
                true
            }
            None => {
                warn!(?owner, now = ?self.now, "unable to cancel timer: it wasn't running");
                false
            }
        }
    }

    /// `owner` 当前是否有挂起的定时器
    pub fn timer_pending(&self, owner: TimerOwner) -> bool {
        self.timers.contains_key(&owner)
    }

    fn push(&mut self, at: SimTime, timer: Option<TimerOwner>, ev: Box<dyn Event>) -> u64 {
        let seq = self.next_seq;
        trace!(now = ?self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at: at.max(self.now),
            seq,
            timer,
            ev,
        });

        debug!(queue_size = self.q.len(), "事件已加入队列");
        seq
    }

    /// 弹出下一个有效事件（跳过已取消的），并把时钟推进到其时间戳。
    fn pop_live(&mut self, until: Option<SimTime>) -> Option<ScheduledEvent> {
        loop {
            let top = self.q.peek()?;
            if self.cancelled.contains(&top.seq) {
                let dead = self.q.pop().expect("peek then pop");
                self.cancelled.remove(&dead.seq);
                continue;
            }
            if until.is_some_and(|u| top.at > u) {
                return None;
            }
            let item = self.q.pop().expect("peek then pop");
            if let Some(owner) = item.timer {
                self.timers.remove(&owner);
            }
            self.now = item.at;
            return Some(item);
        }
    }

    /// 运行直到事件队列为空或到达 `until`。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        while let Some(item) = self.pop_live(Some(until)) {
            self.executed += 1;
            item.ev.execute(self, world);
            world.on_tick(self);
        }
        self.now = self.now.max(until);
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) {
        info!("▶️  开始运行仿真");
        debug!(now = ?self.now, queue_size = self.q.len(), "初始状态");

        let mut event_count = 0;
        while let Some(item) = self.pop_live(None) {
            event_count += 1;
            self.executed += 1;

            debug!(
                event_num = event_count,
                now = ?self.now,
                seq = item.seq,
                timer = ?item.timer,
                remaining_queue = self.q.len(),
                "执行事件"
            );

            item.ev.execute(self, world);
            world.on_tick(self);
        }

        info!(
            total_events = event_count,
            final_time = ?self.now,
            "✅ 仿真完成"
        );
    }
}
