//! 登录、注册与退出
//!
//! 会话的写入只发生在这里（以及适配器处理登录失效时）。

use campus_energy_shared::{LoginRequest, RegisterRequest};
use serde_json::Value;
use tracing::info;

use crate::api;
use crate::client::ApiClient;
use crate::error::{ApiError, ApiErrorKind, ApiResult, MSG_SESSION_NOT_SAVED};
use crate::notify::Notice;
use crate::request::HttpClient;
use crate::route::AppRoute;

/// 登录成功后一次性覆盖内存与存储中的会话；失败时会话保持不变
///
/// 会话无法写入存储时按失败处理，避免刷新后状态丢失。
pub async fn login<C: HttpClient>(client: &ApiClient<C>, credentials: &LoginRequest) -> ApiResult<()> {
    let res = client.send(api::auth::login(credentials)).await?;
    if !client.session().update(|s| s.establish(&res)) {
        client.notifier().notify(Notice::error(MSG_SESSION_NOT_SAVED));
        return Err(ApiError::new(ApiErrorKind::Misconfigured, MSG_SESSION_NOT_SAVED));
    }
    info!(username = %res.username, role = %res.role.as_str(), "logged in");
    Ok(())
}

/// 注册不影响当前会话
pub async fn register<C: HttpClient>(client: &ApiClient<C>, request: &RegisterRequest) -> ApiResult<Value> {
    let res = client.send(api::auth::register(request)).await?;
    info!(username = %request.username, "registered");
    Ok(res)
}

/// 无条件清空会话并回到登录页，可重复调用
pub fn logout<C: HttpClient>(client: &ApiClient<C>) {
    client.session().update(|s| s.clear());
    info!("logged out");
    client.navigator().navigate(AppRoute::auth_failure_redirect());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::session::SessionHandle;
    use crate::storage::KeyValueStore;
    use crate::testing::{Harness, login_response};
    use campus_energy_shared::{Role, STORAGE_PROFILE_KEY, STORAGE_TOKEN_KEY};
    use serde_json::json;
    use std::rc::Rc;

    /// 拒绝一切写入的存储（例如浏览器禁用了 localStorage）
    struct ReadOnlyStorage;

    impl KeyValueStore for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> bool {
            false
        }

        fn delete(&self, _key: &str) -> bool {
            false
        }
    }

    fn credentials() -> LoginRequest {
        LoginRequest {
            username: "li".into(),
            password: "Secret#123".into(),
        }
    }

    #[tokio::test]
    async fn login_establishes_session() {
        let h = Harness::new();
        h.http.mock_response(
            "/api/auth/login",
            200,
            json!({
                "code": 200,
                "message": "登录成功",
                "data": {
                    "token": "tok-abc",
                    "userId": 7,
                    "username": "li",
                    "realName": "李四",
                    "role": "ADMIN",
                    "roleLabel": "管理员"
                }
            }),
        );

        login(&h.client, &credentials()).await.unwrap();

        assert!(h.session.is_authenticated());
        assert!(h.session.is_admin());
        assert_eq!(h.session.display_name(), "李四");
        assert_eq!(h.storage.get(STORAGE_TOKEN_KEY).as_deref(), Some("tok-abc"));
        assert!(h.storage.get(STORAGE_PROFILE_KEY).unwrap().contains("\"role\":\"ADMIN\""));

        let sent = h.http.last_request().unwrap();
        assert_eq!(sent.method, crate::request::HttpMethod::Post);
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "username": "li", "password": "Secret#123" }));
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn failed_login_leaves_session_untouched() {
        let h = Harness::new();
        h.http.mock_response("/api/auth/login", 200, json!({ "code": 1001, "message": "用户名或密码错误" }));

        let err = login(&h.client, &credentials()).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Application);
        assert_eq!(err.message, "用户名或密码错误");
        assert!(!h.session.is_authenticated());
        assert!(h.storage.is_empty());
    }

    #[tokio::test]
    async fn unsaved_session_fails_login() {
        let h = Harness::new();
        let session = SessionHandle::hydrate(Rc::new(ReadOnlyStorage));
        let client = ApiClient::new(
            h.http.clone(),
            ClientConfig::default(),
            session.clone(),
            h.notifier.clone(),
            h.navigator.clone(),
        );
        h.http.mock_response(
            "/api/auth/login",
            200,
            json!({ "code": 200, "data": { "token": "tok-abc", "userId": 7, "username": "li", "role": "USER" } }),
        );

        let err = login(&client, &credentials()).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Misconfigured);
        assert_eq!(err.message, MSG_SESSION_NOT_SAVED);
        assert!(!session.is_authenticated());
        assert_eq!(h.notifier.messages(), vec![MSG_SESSION_NOT_SAVED]);
    }

    #[tokio::test]
    async fn register_does_not_touch_session() {
        let h = Harness::new();
        h.http.mock_response("/api/auth/register", 200, json!({ "code": 200, "data": { "id": 11 } }));

        let req = RegisterRequest {
            username: "zhao".into(),
            password: "Secret#123".into(),
            email: "zhao@campus.edu".into(),
            real_name: None,
            phone: Some("13800138000".into()),
            role: Role::User,
        };
        let data = register(&h.client, &req).await.unwrap();
        assert_eq!(data["id"], 11);
        assert!(!h.session.is_authenticated());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let h = Harness::new();
        h.session.update(|s| s.establish(&login_response(Role::User)));

        logout(&h.client);
        logout(&h.client);

        assert!(!h.session.is_authenticated());
        assert!(h.storage.is_empty());
        assert_eq!(h.navigator.visits(), vec![AppRoute::Login, AppRoute::Login]);
    }
}
