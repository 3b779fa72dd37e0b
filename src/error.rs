use std::fmt;

use crate::request::HttpError;

// =========================================================
// 用户可见的提示文案
// =========================================================

pub const MSG_FALLBACK: &str = "请求失败";
pub const MSG_AUTH_EXPIRED: &str = "登录已过期，请重新登录";
pub const MSG_FORBIDDEN: &str = "权限不足";
pub const MSG_NOT_FOUND: &str = "请求的资源不存在";
pub const MSG_SERVER_FAULT: &str = "服务器内部错误";
pub const MSG_NETWORK: &str = "网络错误，请检查网络连接";
pub const MSG_MISCONFIGURED: &str = "请求配置错误";
pub const MSG_SESSION_NOT_SAVED: &str = "登录状态保存失败，请检查浏览器存储设置";

// =========================================================
// 错误分类
// =========================================================

/// 适配器边界上的错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 收到响应，但业务码不是成功
    Application,
    /// 登录失效（业务码或 HTTP 状态 401）
    AuthExpired,
    /// HTTP 403
    Forbidden,
    /// HTTP 404
    NotFound,
    /// HTTP 5xx
    ServerFault,
    /// 未收到响应（网络不可达或超时）
    Transport,
    /// 请求无法构建或发出
    Misconfigured,
}

impl ApiErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorKind::Application => "APPLICATION",
            ApiErrorKind::AuthExpired => "AUTH_EXPIRED",
            ApiErrorKind::Forbidden => "FORBIDDEN",
            ApiErrorKind::NotFound => "NOT_FOUND",
            ApiErrorKind::ServerFault => "SERVER_FAULT",
            ApiErrorKind::Transport => "TRANSPORT",
            ApiErrorKind::Misconfigured => "MISCONFIGURED",
        }
    }

    /// 该类错误的固定提示文案
    pub fn default_message(&self) -> &'static str {
        match self {
            ApiErrorKind::Application => MSG_FALLBACK,
            ApiErrorKind::AuthExpired => MSG_AUTH_EXPIRED,
            ApiErrorKind::Forbidden => MSG_FORBIDDEN,
            ApiErrorKind::NotFound => MSG_NOT_FOUND,
            ApiErrorKind::ServerFault => MSG_SERVER_FAULT,
            ApiErrorKind::Transport => MSG_NETWORK,
            ApiErrorKind::Misconfigured => MSG_MISCONFIGURED,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 适配器拒绝调用时返回的错误
///
/// `Display` 只输出 `message`，即已经展示给用户的那条提示。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// HTTP 状态码（收到响应时）
    pub http_status: Option<u16>,
    /// 响应信封中的业务码
    pub code: Option<i32>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status: None,
            code: None,
        }
    }

    /// 使用该分类的默认文案
    pub fn of(kind: ApiErrorKind) -> Self {
        Self::new(kind, kind.default_message())
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }

    pub fn is_auth_expired(&self) -> bool {
        self.kind == ApiErrorKind::AuthExpired
    }

    /// 按 HTTP 状态码分类（非 2xx 响应）
    ///
    /// `body_message` 为响应体中的 `message` 字段，仅在无固定文案时使用。
    pub fn from_status(status: u16, body_message: Option<String>) -> Self {
        let err = match status {
            401 => Self::of(ApiErrorKind::AuthExpired),
            403 => Self::of(ApiErrorKind::Forbidden),
            404 => Self::of(ApiErrorKind::NotFound),
            500 => Self::of(ApiErrorKind::ServerFault),
            501..=599 => Self::new(
                ApiErrorKind::ServerFault,
                body_message.unwrap_or_else(|| MSG_SERVER_FAULT.to_string()),
            ),
            _ => Self::new(
                ApiErrorKind::Application,
                body_message.unwrap_or_else(|| MSG_FALLBACK.to_string()),
            ),
        };
        err.with_status(status)
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RequestBuildFailed(_) => Self::of(ApiErrorKind::Misconfigured),
            HttpError::NetworkError(_) | HttpError::Timeout(_) => Self::of(ApiErrorKind::Transport),
            HttpError::ResponseParseFailed(_) => Self::of(ApiErrorKind::Transport),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::from_status(401, None).kind, ApiErrorKind::AuthExpired);
        assert_eq!(ApiError::from_status(403, Some("x".into())).message, MSG_FORBIDDEN);
        assert_eq!(ApiError::from_status(404, None).message, MSG_NOT_FOUND);
        assert_eq!(ApiError::from_status(500, None).message, MSG_SERVER_FAULT);
        assert_eq!(ApiError::from_status(502, Some("网关错误".into())).kind, ApiErrorKind::ServerFault);
        assert_eq!(ApiError::from_status(502, Some("网关错误".into())).message, "网关错误");

        let bad = ApiError::from_status(400, Some("参数错误".into()));
        assert_eq!(bad.kind, ApiErrorKind::Application);
        assert_eq!(bad.message, "参数错误");
        assert_eq!(bad.http_status, Some(400));
        assert_eq!(ApiError::from_status(418, None).message, MSG_FALLBACK);
    }

    #[test]
    fn transport_mapping() {
        let e: ApiError = HttpError::Timeout(Duration::from_secs(15)).into();
        assert_eq!(e.kind, ApiErrorKind::Transport);
        assert_eq!(e.to_string(), MSG_NETWORK);

        let e: ApiError = HttpError::RequestBuildFailed("bad header".into()).into();
        assert_eq!(e.kind, ApiErrorKind::Misconfigured);
    }
}
