//! 智慧校园能耗监测平台：客户端核心
//!
//! 与平台无关的部分都在这里：HTTP 适配器、会话、资源接口、路由守卫。
//! 浏览器相关的实现（fetch、localStorage、History）由前端 crate 提供，
//! 通过 `HttpClient` / `KeyValueStore` / `Navigator` / `Notifier` 注入。

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod notify;
pub mod rate;
pub mod request;
pub mod route;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

pub use campus_energy_shared as shared;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use notify::{LogNotifier, Notice, NoticeLevel, Notifier};
pub use request::{HttpClient, HttpError, HttpRequest, HttpResponse};
pub use route::{AppRoute, Navigation, Navigator, guard};
pub use session::{Session, SessionHandle, SessionStore};
pub use storage::{KeyValueStore, MemoryStorage};

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;
