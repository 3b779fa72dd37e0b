//! 应用上下文与认证操作
//!
//! 启动时从 LocalStorage 恢复会话，组装适配器、路由服务与提示组件，
//! 通过 Context 在组件间共享。会话的唯一写入者是核心库，
//! 界面只订阅 `session` 快照。

use campus_energy::config::{ENV_BASE_URL, ENV_TIMEOUT_SECS};
use campus_energy::route::{AppRoute, Navigator};
use campus_energy::shared::date::Timestamp;
use campus_energy::shared::protocol::Endpoint;
use campus_energy::shared::{LoginRequest, RegisterRequest};
use campus_energy::{ApiClient, ApiResult, ClientConfig, Notice, Notifier, Session, SessionHandle};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use std::rc::Rc;
use tracing::info;

use crate::web::{BrowserStorage, FetchHttpClient, RouterService, Toasts};

pub type Client = ApiClient<FetchHttpClient>;

/// 构建时注入的配置，未设置时使用默认值
fn compiled_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| match key {
        ENV_BASE_URL => option_env!("CAMPUS_ENERGY_API_BASE").map(str::to_string),
        ENV_TIMEOUT_SECS => option_env!("CAMPUS_ENERGY_TIMEOUT_SECS").map(str::to_string),
        _ => None,
    })
}

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    client: StoredValue<Client, LocalStorage>,
    router: StoredValue<RouterService, LocalStorage>,
    /// 会话快照（只读订阅）
    pub session: RwSignal<Session>,
    pub route: RwSignal<AppRoute>,
    pub toasts: Toasts,
}

impl AuthContext {
    pub fn new() -> Self {
        let handle = SessionHandle::hydrate(Rc::new(BrowserStorage));

        // 过期的 Token 直接丢弃，避免第一个请求才发现
        let stale = handle.with(|s| s.is_authenticated() && s.token_expired(Timestamp::now()));
        if stale {
            info!("stored token has expired, clearing session");
            handle.update(|s| s.clear());
        }

        let toasts = Toasts::new();
        let session = RwSignal::new(handle.snapshot());
        let router = RouterService::new(handle.clone(), session, Rc::new(toasts));
        let route = router.current_route();

        let client = ApiClient::new(
            FetchHttpClient::new(),
            compiled_config(),
            handle,
            Rc::new(toasts),
            Rc::new(router.clone()),
        );

        Self {
            client: StoredValue::new_local(client),
            router: StoredValue::new_local(router),
            session,
            route,
            toasts,
        }
    }

    pub fn start_router(&self) {
        self.router.with_value(|r| r.start());
    }

    pub fn client(&self) -> Client {
        self.client.get_value()
    }

    pub fn navigate(&self, route: AppRoute) {
        self.router.with_value(|r| r.navigate(route));
    }

    pub fn notify(&self, notice: Notice) {
        self.toasts.notify(notice);
    }

    pub fn is_admin(&self) -> bool {
        self.session.with(Session::is_admin)
    }

    pub fn display_name(&self) -> String {
        self.session.with(Session::display_name)
    }

    /// 在后台发起一次调用，结果交给回调；失败提示已由适配器完成
    pub fn request<T: DeserializeOwned + 'static>(
        &self,
        endpoint: Endpoint<T>,
        on_done: impl FnOnce(ApiResult<T>) + 'static,
    ) {
        let client = self.client();
        spawn_local(async move {
            on_done(client.send(endpoint).await);
        });
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录，成功后进入首页
pub async fn login(ctx: AuthContext, credentials: LoginRequest) -> bool {
    let client = ctx.client();
    match campus_energy::auth::login(&client, &credentials).await {
        Ok(()) => {
            ctx.notify(Notice::success("登录成功"));
            ctx.navigate(AppRoute::home());
            true
        }
        Err(_) => false,
    }
}

/// 注册，成功后回到登录页
pub async fn register(ctx: AuthContext, request: RegisterRequest) -> bool {
    let client = ctx.client();
    match campus_energy::auth::register(&client, &request).await {
        Ok(_) => {
            ctx.notify(Notice::success("注册成功，请登录"));
            ctx.navigate(AppRoute::Login);
            true
        }
        Err(_) => false,
    }
}

/// 注销：清空会话并回到登录页
pub fn logout(ctx: AuthContext) {
    campus_energy::auth::logout(&ctx.client());
}
