//! 全局提示（toast）
//!
//! 适配器与页面都通过 `Notifier` 推送提示，3 秒后自动消失。

use campus_energy::{Notice, NoticeLevel, Notifier};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const TOAST_LIFETIME_MS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn items(&self) -> RwSignal<Vec<Toast>> {
        self.items
    }

    fn dismiss(&self, id: u64) {
        self.items.update(|list| list.retain(|t| t.id != id));
    }
}

impl Notifier for Toasts {
    fn notify(&self, notice: Notice) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|list| list.push(Toast { id, notice }));

        let toasts = *self;
        Timeout::new(TOAST_LIFETIME_MS, move || toasts.dismiss(id)).forget();
    }
}

fn alert_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "alert alert-success shadow-lg",
        NoticeLevel::Info => "alert alert-info shadow-lg",
        NoticeLevel::Warning => "alert alert-warning shadow-lg",
        NoticeLevel::Error => "alert alert-error shadow-lg",
    }
}

#[component]
pub fn ToastHost(toasts: Toasts) -> impl IntoView {
    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toasts.items().get()
                key=|t| t.id
                children=move |t| {
                    view! {
                        <div class=alert_class(t.notice.level)>
                            <span>{t.notice.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
