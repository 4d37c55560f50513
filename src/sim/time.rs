//! 仿真时间类型
//!
//! 协议以“时间单位”描述时延（平均单向时延约 5 个单位），内部用定点整数表示，
//! 保证事件排序是全序的。

use std::fmt;

/// 每个时间单位包含的 tick 数。
pub const TICKS_PER_UNIT: u64 = 1_000_000;

/// 仿真时间（tick，1 个时间单位 = `TICKS_PER_UNIT` tick）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// 由整数个时间单位构造
    pub fn from_units(units: u64) -> SimTime {
        SimTime(units.saturating_mul(TICKS_PER_UNIT))
    }

    /// 由小数时间单位构造；负数与 NaN 视为 0，溢出饱和。
    pub fn from_units_f64(units: f64) -> SimTime {
        if !(units > 0.0) {
            return SimTime::ZERO;
        }
        let ticks = (units * TICKS_PER_UNIT as f64).round();
        if ticks >= u64::MAX as f64 {
            SimTime(u64::MAX)
        } else {
            SimTime(ticks as u64)
        }
    }

    /// 转回小数时间单位（用于日志/汇总输出）
    pub fn as_units_f64(self) -> f64 {
        self.0 as f64 / TICKS_PER_UNIT as f64
    }

    pub fn saturating_add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.as_units_f64())
    }
}
