//! 节流与防抖
//!
//! 纯状态机，只根据传入的 `Timestamp` 判定；由界面层的定时器驱动。

use campus_energy_shared::date::Timestamp;
use std::time::Duration;

/// 节流：每个间隔内最多触发一次（首个调用立即触发）
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_fired: Option<Timestamp>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// 返回 `true` 表示本次调用应当执行
    pub fn try_fire(&mut self, now: Timestamp) -> bool {
        match self.last_fired {
            Some(last) if now - last < self.interval => false,
            _ => {
                self.last_fired = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}

/// 防抖票据，对应一次输入
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// 防抖：输入静默 `delay` 之后只触发最后一次
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    generation: u64,
    last_input: Option<Timestamp>,
    fired: bool,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            last_input: None,
            fired: false,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 记录一次输入，之前发出的票据全部作废
    pub fn input(&mut self, now: Timestamp) -> Ticket {
        self.generation += 1;
        self.last_input = Some(now);
        self.fired = false;
        Ticket(self.generation)
    }

    /// 定时器到期时调用
    ///
    /// 只有最新的票据、且距最后一次输入已满 `delay` 时返回 `true`，每次输入最多一次。
    pub fn fire(&mut self, ticket: Ticket, now: Timestamp) -> bool {
        let quiet = match self.last_input {
            Some(last) => now - last >= self.delay,
            None => false,
        };
        if ticket.0 != self.generation || self.fired || !quiet {
            return false;
        }
        self.fired = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> Timestamp {
        Timestamp::new(ms)
    }

    #[test]
    fn throttle_fires_once_per_interval() {
        let mut t = Throttle::new(Duration::from_millis(1000));
        assert!(t.try_fire(at(0)));
        assert!(!t.try_fire(at(10)));
        assert!(!t.try_fire(at(999)));
        assert!(t.try_fire(at(1000)));
        assert!(!t.try_fire(at(1500)));

        t.reset();
        assert!(t.try_fire(at(1501)));
    }

    #[test]
    fn debounce_keeps_only_last_input() {
        let mut d = Debounce::new(Duration::from_millis(300));
        let first = d.input(at(0));
        let second = d.input(at(100));

        assert!(!d.fire(first, at(300)));
        assert!(!d.fire(second, at(399)));
        assert!(d.fire(second, at(400)));
        assert!(!d.fire(second, at(800)));
    }

    #[test]
    fn debounce_rearms_after_new_input() {
        let mut d = Debounce::new(Duration::from_millis(300));
        let t = d.input(at(0));
        assert!(d.fire(t, at(300)));
        let t = d.input(at(1000));
        assert!(d.fire(t, at(1300)));
    }
}
