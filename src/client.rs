//! HTTP 适配器
//!
//! 所有接口调用都经过 `ApiClient::send`：
//! 前置步骤附加认证头，后置步骤把 HTTP 状态与响应信封统一归类为
//! 成功数据或 `ApiError`，并在边界上完成提示与登录失效处理。
//! 不做重试、去重或排队；每次调用独立完成。

use campus_energy_shared::protocol::Endpoint;
use campus_energy_shared::{ApiEnvelope, HEADER_AUTHORIZATION, SUCCESS_CODE, UNAUTHORIZED_CODE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiErrorKind, ApiResult, MSG_FALLBACK};
use crate::notify::{Notice, Notifier};
use crate::request::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::route::{AppRoute, Navigator};
use crate::session::SessionHandle;

/// 共享的接口客户端
#[derive(Clone)]
pub struct ApiClient<C: HttpClient> {
    http: C,
    config: ClientConfig,
    session: SessionHandle,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(
        http: C,
        config: ClientConfig,
        session: SessionHandle,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            http,
            config,
            session,
            notifier,
            navigator,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.config.base(), path)
        } else {
            format!("{}/{}", self.config.base(), path)
        }
    }

    /// 发送一次调用并归一化结果
    pub async fn send<T: DeserializeOwned>(&self, endpoint: Endpoint<T>) -> ApiResult<T> {
        let request = match self.authorize(&endpoint) {
            Ok(request) => request,
            Err(e) => return Err(self.reject(e, &endpoint)),
        };

        debug!(method = %endpoint.method, path = %endpoint.path, "sending request");
        let outcome = self.http.send(request).await;

        self.classify(outcome).map_err(|e| self.reject(e, &endpoint))
    }

    // =========================================================
    // 前置步骤：构建请求并附加认证
    // =========================================================

    fn authorize<T>(&self, endpoint: &Endpoint<T>) -> Result<HttpRequest, ApiError> {
        if let Some(reason) = &endpoint.build_error {
            return Err(ApiError::from(HttpError::RequestBuildFailed(reason.clone())));
        }

        let mut request = HttpRequest::new(
            &self.url(&endpoint.path),
            endpoint.method,
            self.config.timeout(),
        )
        .with_header("Accept", "application/json")
        .with_query(endpoint.query.clone());

        if let Some(token) = self.session.token() {
            request = request.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        if let Some(body) = &endpoint.body {
            request = request
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        Ok(request)
    }

    // =========================================================
    // 后置步骤：归类结果
    // =========================================================

    fn classify<T: DeserializeOwned>(
        &self,
        outcome: Result<HttpResponse, HttpError>,
    ) -> Result<T, ApiError> {
        let response = outcome.map_err(ApiError::from)?;

        if !response.ok() {
            return Err(ApiError::from_status(
                response.status,
                body_message(&response.body),
            ));
        }

        let envelope: ApiEnvelope<Value> = serde_json::from_str(&response.body).map_err(|e| {
            warn!(error = %e, "response is not a valid envelope");
            ApiError::new(ApiErrorKind::Application, MSG_FALLBACK).with_status(response.status)
        })?;

        match envelope.code {
            SUCCESS_CODE => {
                let data = envelope.data.unwrap_or(Value::Null);
                serde_json::from_value(data).map_err(|e| {
                    warn!(error = %e, "envelope data does not match the expected type");
                    ApiError::new(ApiErrorKind::Application, MSG_FALLBACK)
                        .with_status(response.status)
                        .with_code(SUCCESS_CODE)
                })
            }
            UNAUTHORIZED_CODE => Err(ApiError::new(
                ApiErrorKind::AuthExpired,
                non_empty(envelope.message)
                    .unwrap_or_else(|| ApiErrorKind::AuthExpired.default_message().to_string()),
            )
            .with_status(response.status)
            .with_code(UNAUTHORIZED_CODE)),
            code => Err(ApiError::new(
                ApiErrorKind::Application,
                non_empty(envelope.message).unwrap_or_else(|| MSG_FALLBACK.to_string()),
            )
            .with_status(response.status)
            .with_code(code)),
        }
    }

    /// 边界副作用：每个错误恰好一条提示；登录失效时清空会话并跳转登录页
    fn reject<T>(&self, err: ApiError, endpoint: &Endpoint<T>) -> ApiError {
        warn!(
            kind = %err.kind,
            method = %endpoint.method,
            path = %endpoint.path,
            message = %err.message,
            "request rejected"
        );

        let redirect = err.is_auth_expired() && self.session.update(|s| s.expire());
        self.notifier.notify(Notice::error(err.message.clone()));
        if redirect {
            self.navigator.navigate(AppRoute::auth_failure_redirect());
        }

        err
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

/// 非 2xx 响应体中的 `message` 字段
fn body_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
        .and_then(|m| non_empty(Some(m)))
}
