//! 定时器封装模块
//!
//! 用 `gloo-timers` 驱动核心库里的节流/防抖状态机。

use campus_energy::rate::{Debounce, Throttle};
use campus_energy::shared::date::Timestamp;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use std::time::Duration;

/// 防抖：连续调用时只执行静默 `delay` 后的最后一次
#[derive(Clone, Copy)]
pub struct Debouncer {
    state: StoredValue<Debounce>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: StoredValue::new(Debounce::new(delay)),
        }
    }

    pub fn call(&self, f: impl FnOnce() + 'static) {
        let mut ticket = None;
        self.state.update_value(|d| ticket = Some(d.input(Timestamp::now())));
        let Some(ticket) = ticket else {
            return;
        };

        let delay = self.state.with_value(|d| d.delay());
        // 浏览器计时器精度有限，多等 1ms 保证静默期已满
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX).saturating_add(1);
        let state = self.state;
        Timeout::new(millis, move || {
            let mut due = false;
            state.update_value(|d| due = d.fire(ticket, Timestamp::now()));
            if due {
                f();
            }
        })
        .forget();
    }
}

/// 节流：间隔内只放行第一次
#[derive(Clone, Copy)]
pub struct Throttled {
    state: StoredValue<Throttle>,
}

impl Throttled {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: StoredValue::new(Throttle::new(interval)),
        }
    }

    pub fn allow(&self) -> bool {
        let mut allowed = false;
        self.state.update_value(|t| allowed = t.try_fire(Timestamp::now()));
        allowed
    }
}
