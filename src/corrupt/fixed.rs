//! 确定性损坏：按给定顺序循环使用类别，不依赖随机数。

use crate::net::Packet;

use super::{CorruptionClass, Corruptor};

#[derive(Debug, Clone)]
pub struct FixedCorruptor {
    classes: Vec<CorruptionClass>,
    next: usize,
}

impl FixedCorruptor {
    /// `classes` 为空时退化为只损坏载荷。
    pub fn new(classes: Vec<CorruptionClass>) -> Self {
        let classes = if classes.is_empty() {
            vec![CorruptionClass::Payload]
        } else {
            classes
        };
        Self { classes, next: 0 }
    }

    pub fn always(class: CorruptionClass) -> Self {
        Self::new(vec![class])
    }
}

impl Corruptor for FixedCorruptor {
    fn corrupt(&mut self, pkt: &mut Packet, _draw: f64) -> CorruptionClass {
        let class = self.classes[self.next % self.classes.len()];
        self.next = self.next.wrapping_add(1);
        class.apply(pkt);
        class
    }
}
