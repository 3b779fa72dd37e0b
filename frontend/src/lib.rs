//! 智慧校园能耗监测平台 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `web`: 浏览器能力（fetch、存储、路由服务、提示、定时器）
//! - `auth`: 应用上下文与认证操作
//! - `components`: UI 组件层

mod auth;
pub mod logging;
mod components {
    pub mod alerts;
    pub mod buildings;
    pub mod dashboard;
    pub mod devices;
    pub mod energy;
    pub mod layout;
    pub mod login;
    pub mod register;
    pub mod users;
}
pub(crate) mod web;

use campus_energy::route::AppRoute;
use leptos::prelude::*;

use crate::auth::AuthContext;
use crate::components::alerts::AlertPage;
use crate::components::buildings::BuildingPage;
use crate::components::dashboard::DashboardPage;
use crate::components::devices::DevicePage;
use crate::components::energy::EnergyPage;
use crate::components::layout::MainLayout;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::users::UserPage;
use crate::web::ToastHost;

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Login => return view! { <LoginPage /> }.into_any(),
        AppRoute::Register => return view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Building => view! { <BuildingPage /> }.into_any(),
        AppRoute::Device => view! { <DevicePage /> }.into_any(),
        AppRoute::Energy => view! { <EnergyPage /> }.into_any(),
        AppRoute::Alert => view! { <AlertPage /> }.into_any(),
        AppRoute::User => view! { <UserPage /> }.into_any(),
    };
    view! { <MainLayout>{page}</MainLayout> }.into_any()
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 恢复会话并组装适配器、路由服务
    let auth = AuthContext::new();
    provide_context(auth);

    // 2. 对当前地址执行守卫
    auth.start_router();

    view! {
        <ToastHost toasts=auth.toasts />
        {move || route_matcher(auth.route.get())}
    }
}
