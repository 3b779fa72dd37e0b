//! 浏览器端实现
//!
//! 核心库的注入点在这里落地：fetch、LocalStorage、History、toast、定时器。

mod http;
pub mod router;
mod storage;
mod timer;
mod toast;

pub use http::FetchHttpClient;
pub use router::RouterService;
pub use storage::BrowserStorage;
pub use timer::{Debouncer, Throttled};
pub use toast::{ToastHost, Toasts};
