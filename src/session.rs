//! 会话状态管理
//!
//! 持有认证 Token 与用户资料，每次变更都同步写入持久化存储，
//! 内存状态与存储内容在任意一次调用结束后保持一致。
//! 适配器与路由守卫通过 `SessionHandle` 共享同一份状态。

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use campus_energy_shared::date::Timestamp;
use campus_energy_shared::{LoginResponse, Role, STORAGE_PROFILE_KEY, STORAGE_TOKEN_KEY, UserProfile};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;

use crate::storage::KeyValueStore;

/// 会话快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// 为空表示未认证
    pub token: Option<String>,
    pub profile: Option<UserProfile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// 角色只来源于持久化的用户资料
    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    /// 真实姓名，缺省时使用用户名
    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .map(|p| {
                p.real_name
                    .clone()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| p.username.clone())
            })
            .unwrap_or_default()
    }
}

/// 会话存储
pub struct SessionStore {
    session: Session,
    storage: Rc<dyn KeyValueStore>,
    /// 登录失效已处理过一次，直到下次登录前不再重复跳转
    expiry_latched: bool,
}

impl SessionStore {
    /// 从持久化存储恢复会话
    ///
    /// 资料无法解析时视为不存在；没有 Token 时不加载资料。
    pub fn hydrate(storage: Rc<dyn KeyValueStore>) -> Self {
        let token = storage.get(STORAGE_TOKEN_KEY).filter(|t| !t.is_empty());
        let profile = match (&token, storage.get(STORAGE_PROFILE_KEY)) {
            (Some(_), Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!(error = %e, "stored user profile is unreadable, ignoring it");
                    None
                }
            },
            _ => None,
        };

        Self {
            session: Session { token, profile },
            storage,
            expiry_latched: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.session.profile.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn display_name(&self) -> String {
        self.session.display_name()
    }

    /// 管理员拥有全部权限，普通用户只拥有 `USER` 权限
    pub fn has_permission(&self, required: Role) -> bool {
        match self.role() {
            Some(Role::Admin) => true,
            Some(Role::User) => required == Role::User,
            None => false,
        }
    }

    /// 用登录结果整体覆盖会话（内存与存储）
    ///
    /// 存储写入失败时回滚已写入的键并清空内存，返回 `false`，
    /// 保证内存与存储始终一致。
    pub fn establish(&mut self, res: &LoginResponse) -> bool {
        let profile = UserProfile::from(res);
        let persisted = self.storage.set(STORAGE_TOKEN_KEY, &res.token)
            && match serde_json::to_string(&profile) {
                Ok(raw) => self.storage.set(STORAGE_PROFILE_KEY, &raw),
                Err(_) => false,
            };
        if !persisted {
            warn!("session could not be persisted, discarding it");
            self.clear();
            return false;
        }

        self.session = Session {
            token: Some(res.token.clone()),
            profile: Some(profile),
        };
        self.expiry_latched = false;
        true
    }

    /// 无条件清空会话
    pub fn clear(&mut self) {
        self.storage.delete(STORAGE_TOKEN_KEY);
        self.storage.delete(STORAGE_PROFILE_KEY);
        self.session = Session::default();
    }

    /// 处理登录失效：清空会话
    ///
    /// 返回 `true` 表示这是本次认证周期内第一次失效，调用方应当跳转登录页；
    /// 之后并发到达的失效信号返回 `false`。
    pub fn expire(&mut self) -> bool {
        self.clear();
        !std::mem::replace(&mut self.expiry_latched, true)
    }

    /// Token 是否已过期
    ///
    /// 读取 JWT 载荷中的 `exp`（秒）。没有 Token 或无法解析时视为已过期。
    pub fn token_expired(&self, now: Timestamp) -> bool {
        match self.token().and_then(jwt_expiry) {
            Some(exp) => exp.as_millis() <= now.as_millis(),
            None => true,
        }
    }
}

/// 解析 JWT 的 `exp` 声明
fn jwt_expiry(token: &str) -> Option<Timestamp> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_i64()?;
    Some(Timestamp::new(exp.saturating_mul(1000)))
}

// =========================================================
// 共享句柄
// =========================================================

/// 会话的共享句柄
///
/// 单线程环境下的唯一写入者模型：读取与修改都在闭包内同步完成，
/// 不会跨越 await 持有借用。
#[derive(Clone)]
pub struct SessionHandle(Rc<RefCell<SessionStore>>);

impl SessionHandle {
    pub fn new(store: SessionStore) -> Self {
        Self(Rc::new(RefCell::new(store)))
    }

    pub fn hydrate(storage: Rc<dyn KeyValueStore>) -> Self {
        Self::new(SessionStore::hydrate(storage))
    }

    pub fn with<R>(&self, f: impl FnOnce(&SessionStore) -> R) -> R {
        f(&self.0.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut SessionStore) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub fn snapshot(&self) -> Session {
        self.with(|s| s.session().clone())
    }

    pub fn token(&self) -> Option<String> {
        self.with(|s| s.token().map(str::to_string))
    }

    pub fn is_authenticated(&self) -> bool {
        self.with(SessionStore::is_authenticated)
    }

    pub fn is_admin(&self) -> bool {
        self.with(SessionStore::is_admin)
    }

    pub fn role(&self) -> Option<Role> {
        self.with(SessionStore::role)
    }

    pub fn display_name(&self) -> String {
        self.with(SessionStore::display_name)
    }
}
