//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其元信息，以及导航前的守卫规则。

use campus_energy_shared::APP_TITLE;
use std::fmt::Display;

use crate::session::SessionStore;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    Login,
    Register,
    /// 首页概览（默认路由）
    #[default]
    Dashboard,
    Building,
    Device,
    Energy,
    Alert,
    /// 用户管理（仅管理员）
    User,
}

impl AppRoute {
    /// 侧边菜单中展示的页面
    pub const MENU: [AppRoute; 6] = [
        AppRoute::Dashboard,
        AppRoute::Building,
        AppRoute::Device,
        AppRoute::Energy,
        AppRoute::Alert,
        AppRoute::User,
    ];

    /// 将 URL path 解析为路由枚举
    ///
    /// `/` 与未知路径都落到首页。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/building" => Self::Building,
            "/device" => Self::Device,
            "/energy" => Self::Energy,
            "/alert" => Self::Alert,
            "/user" => Self::User,
            _ => Self::Dashboard,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Building => "/building",
            Self::Device => "/device",
            Self::Energy => "/energy",
            Self::Alert => "/alert",
            Self::User => "/user",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Dashboard => "Dashboard",
            Self::Building => "Building",
            Self::Device => "Device",
            Self::Energy => "Energy",
            Self::Alert => "Alert",
            Self::User => "User",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "登录",
            Self::Register => "注册",
            Self::Dashboard => "首页概览",
            Self::Building => "建筑管理",
            Self::Device => "设备管理",
            Self::Energy => "能耗数据",
            Self::Alert => "告警管理",
            Self::User => "用户管理",
        }
    }

    /// 浏览器标签页标题
    pub fn document_title(&self) -> String {
        format!("{} - {}", self.title(), APP_TITLE)
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !self.is_auth_entry()
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Self::User)
    }

    /// 登录/注册页：已认证用户应该离开
    pub fn is_auth_entry(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 已认证或权限不足时的重定向目标
    pub fn home() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 导航执行端，由界面层实现（浏览器 History、测试记录器等）
pub trait Navigator {
    fn navigate(&self, route: AppRoute);
}

// =========================================================
// 导航守卫
// =========================================================

pub const MSG_NO_PERMISSION: &str = "权限不足";

/// 守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// 放行到目标路由
    Proceed(AppRoute),
    /// 改道到其他路由，可能附带一条提示
    Redirect {
        to: AppRoute,
        notice: Option<&'static str>,
    },
}

impl Navigation {
    /// 最终渲染的路由
    pub fn destination(&self) -> AppRoute {
        match self {
            Navigation::Proceed(route) => *route,
            Navigation::Redirect { to, .. } => *to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Navigation::Redirect { .. })
    }
}

/// 在每次导航之前求值
///
/// 1. 需要认证但没有 Token → 登录页
/// 2. 目标是登录/注册页且已有 Token → 首页
/// 3. 需要管理员但角色不是管理员 → 提示权限不足并回到首页
/// 4. 否则放行
pub fn guard(target: AppRoute, session: &SessionStore) -> Navigation {
    let has_token = session.is_authenticated();

    if target.requires_auth() && !has_token {
        return Navigation::Redirect {
            to: AppRoute::auth_failure_redirect(),
            notice: None,
        };
    }

    if target.is_auth_entry() && has_token {
        return Navigation::Redirect {
            to: AppRoute::home(),
            notice: None,
        };
    }

    if target.requires_admin() && !session.is_admin() {
        return Navigation::Redirect {
            to: AppRoute::home(),
            notice: Some(MSG_NO_PERMISSION),
        };
    }

    Navigation::Proceed(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use campus_energy_shared::{LoginResponse, Role};
    use std::rc::Rc;

    fn session(role: Option<Role>) -> SessionStore {
        let mut store = SessionStore::hydrate(Rc::new(MemoryStorage::new()));
        if let Some(role) = role {
            store.establish(&LoginResponse {
                token: "t".into(),
                user_id: 1,
                username: "u".into(),
                real_name: None,
                role,
                role_label: None,
            });
        }
        store
    }

    #[test]
    fn path_round_trip_and_fallbacks() {
        for route in AppRoute::MENU {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/nope/deeper"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/login?redirect=x"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/device/"), AppRoute::Device);
    }

    #[test]
    fn document_title() {
        assert_eq!(AppRoute::Energy.document_title(), "能耗数据 - 智慧校园能耗监测平台");
    }

    #[test]
    fn anonymous_is_sent_to_login() {
        let s = session(None);
        for route in AppRoute::MENU {
            assert_eq!(
                guard(route, &s),
                Navigation::Redirect { to: AppRoute::Login, notice: None }
            );
        }
        assert_eq!(guard(AppRoute::Login, &s), Navigation::Proceed(AppRoute::Login));
        assert_eq!(guard(AppRoute::Register, &s), Navigation::Proceed(AppRoute::Register));
    }

    #[test]
    fn authenticated_leaves_login() {
        let s = session(Some(Role::User));
        assert_eq!(guard(AppRoute::Login, &s).destination(), AppRoute::Dashboard);
        assert_eq!(guard(AppRoute::Register, &s).destination(), AppRoute::Dashboard);
        assert_eq!(guard(AppRoute::Energy, &s), Navigation::Proceed(AppRoute::Energy));
    }

    #[test]
    fn non_admin_cannot_open_user_management() {
        let s = session(Some(Role::User));
        assert_eq!(
            guard(AppRoute::User, &s),
            Navigation::Redirect {
                to: AppRoute::Dashboard,
                notice: Some(MSG_NO_PERMISSION)
            }
        );
    }

    #[test]
    fn admin_can_open_user_management() {
        let s = session(Some(Role::Admin));
        assert_eq!(guard(AppRoute::User, &s), Navigation::Proceed(AppRoute::User));
    }
}
