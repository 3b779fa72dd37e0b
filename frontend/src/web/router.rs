//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 每次导航都走"快照会话 -> 守卫 -> 写 History -> 更新标题 -> 加载"的流程。

use campus_energy::route::{AppRoute, Navigation, Navigator, guard};
use campus_energy::{Notice, Notifier, Session, SessionHandle};
use leptos::prelude::*;
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(path: &str, push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let _ = if push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
}

fn set_document_title(route: AppRoute) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(&route.document_title());
    }
}

/// 路由器服务
///
/// 持有会话句柄以执行守卫；`session_view` 是给界面订阅的会话快照，
/// 每次导航前刷新，登录、退出、登录失效都会经过这里。
#[derive(Clone)]
pub struct RouterService {
    current_route: RwSignal<AppRoute>,
    session: SessionHandle,
    session_view: RwSignal<Session>,
    notifier: Rc<dyn Notifier>,
}

impl RouterService {
    pub fn new(session: SessionHandle, session_view: RwSignal<Session>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            current_route: RwSignal::new(AppRoute::from_path(&current_path())),
            session,
            session_view,
            notifier,
        }
    }

    pub fn current_route(&self) -> RwSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// `push` 为 false 时替换当前 History 记录（初次加载与后退/前进）。
    fn go(&self, target: AppRoute, push: bool) {
        self.session_view.set(self.session.snapshot());

        let decision = self.session.with(|s| guard(target, s));
        if let Navigation::Redirect {
            notice: Some(msg), ..
        } = decision
        {
            self.notifier.notify(Notice::error(msg));
        }

        let dest = decision.destination();
        if decision.is_redirect() {
            debug!(from = %target, to = %dest, "navigation redirected");
        }

        // 后退/前进时地址栏已经是目标地址，只有改道才需要改写
        if push || decision.is_redirect() || current_path() != dest.to_path() {
            write_history(dest.to_path(), push);
        }
        set_document_title(dest);
        self.current_route.set(dest);
    }

    /// 对当前地址执行一次守卫并开始监听后退/前进
    pub fn start(&self) {
        self.go(AppRoute::from_path(&current_path()), false);

        let router = self.clone();
        let closure = Closure::<dyn Fn()>::new(move || {
            router.go(AppRoute::from_path(&current_path()), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

impl Navigator for RouterService {
    fn navigate(&self, route: AppRoute) {
        self.go(route, true);
    }
}
