use std::time::Duration;

pub use campus_energy_shared::protocol::HttpMethod;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 传输层错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("请求构建失败: {0}")]
    RequestBuildFailed(String),
    /// 网络请求失败（未收到响应）
    #[error("网络错误: {0}")]
    NetworkError(String),
    /// 超过客户端超时时间
    #[error("请求超时 ({0:?})")]
    Timeout(Duration),
    /// 响应体读取失败
    #[error("响应解析失败: {0}")]
    ResponseParseFailed(String),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            timeout,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: &serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器环境下 fetch 的 future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

#[async_trait::async_trait(?Send)]
impl<T: HttpClient + ?Sized> HttpClient for std::rc::Rc<T> {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(req).await
    }
}

// =========================================================
// 实现层: reqwest 客户端 (Native)
// =========================================================

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestHttpClient;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};

    #[derive(Clone, Default)]
    pub struct ReqwestHttpClient {
        client: reqwest::Client,
    }

    impl ReqwestHttpClient {
        pub fn new() -> Self {
            Self {
                client: reqwest::Client::new(),
            }
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for ReqwestHttpClient {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
            let method = match req.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Patch => reqwest::Method::PATCH,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self
                .client
                .request(method, &req.url)
                .timeout(req.timeout)
                .query(&req.query);

            for (k, v) in &req.headers {
                builder = builder.header(k, v);
            }

            if let Some(body) = req.body {
                builder = builder.body(body);
            }

            let resp = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout(req.timeout)
                } else if e.is_builder() {
                    HttpError::RequestBuildFailed(e.to_string())
                } else {
                    HttpError::NetworkError(e.to_string())
                }
            })?;

            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .map_err(|e| HttpError::ResponseParseFailed(e.to_string()))?;

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod native_tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::config::ClientConfig;
    use crate::error::{ApiErrorKind, MSG_NETWORK};
    use crate::notify::LogNotifier;
    use crate::session::SessionHandle;
    use crate::storage::MemoryStorage;
    use crate::testing::{RecordingNavigator, init_tracing};
    use serde_json::Value;
    use std::net::TcpListener;
    use std::rc::Rc;

    /// 绑定后立即释放，得到一个当前无人监听的端口
    fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        let url = format!("http://127.0.0.1:{}/api/buildings", closed_port());
        let req = HttpRequest::new(&url, HttpMethod::Get, Duration::from_secs(5));

        let err = ReqwestHttpClient::new().send(req).await.unwrap_err();
        assert!(matches!(err, HttpError::NetworkError(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn malformed_url_fails_to_build() {
        let req = HttpRequest::new("not a url", HttpMethod::Get, Duration::from_secs(5));

        let err = ReqwestHttpClient::new().send(req).await.unwrap_err();
        assert!(matches!(err, HttpError::RequestBuildFailed(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn adapter_reports_unreachable_server() {
        init_tracing();
        let navigator = Rc::new(RecordingNavigator::default());
        let client = ApiClient::new(
            ReqwestHttpClient::new(),
            ClientConfig::new(format!("http://127.0.0.1:{}/api", closed_port())),
            SessionHandle::hydrate(Rc::new(MemoryStorage::new())),
            Rc::new(LogNotifier),
            navigator.clone(),
        );

        let err = client
            .send(campus_energy_shared::protocol::Endpoint::<Value>::get("/statistics/overview"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Transport);
        assert_eq!(err.message, MSG_NETWORK);
        assert!(navigator.visits().is_empty());
    }
}

// =========================================================
// 测试层: 可编排的 Mock 客户端
// =========================================================

#[cfg(test)]
pub use mock::MockHttpClient;
