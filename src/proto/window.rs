//! 序号空间与窗口运算（模 N）

/// 大小为 `modulus` 的循环序号空间上宽度为 `window` 的窗口。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqSpace {
    window: u32,
    modulus: u32,
}

impl SeqSpace {
    pub fn new(window: u32, modulus: u32) -> Self {
        debug_assert!(window >= 1 && modulus >= window.saturating_mul(2));
        Self { window, modulus }
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    /// `i` 是否是合法序号（< N）
    pub fn contains(&self, i: u32) -> bool {
        i < self.modulus
    }

    /// `(a + k) mod N`
    pub fn add(&self, a: u32, k: u32) -> u32 {
        ((a as u64 + k as u64) % self.modulus as u64) as u32
    }

    /// 从 `from` 前进到 `to` 需要的步数，`(to - from) mod N`
    pub fn distance(&self, from: u32, to: u32) -> u32 {
        ((to as u64 + self.modulus as u64 - from as u64 % self.modulus as u64)
            % self.modulus as u64) as u32
    }

    /// `i ∈ [base, base + W)`（模 N）。
    ///
    /// 不回绕：`base ≤ i < base + W`；回绕：`i < base` 且 `i + N < base + W`。
    pub fn is_within_window(&self, base: u32, i: u32) -> bool {
        let (base, i) = (base as u64, i as u64);
        let end = base + self.window as u64;
        let right = i >= base && i < end;
        let left = i < base && i + (self.modulus as u64) < end;
        right || left
    }
}
