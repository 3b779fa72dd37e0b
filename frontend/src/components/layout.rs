use campus_energy::route::AppRoute;
use leptos::prelude::*;

use crate::auth::{logout, use_auth};

/// 登录后的页面框架：侧边菜单 + 顶栏
#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    let auth = use_auth();

    // 用户管理只对管理员可见
    let menu = move || {
        AppRoute::MENU
            .into_iter()
            .filter(|r| !r.requires_admin() || auth.is_admin())
            .collect::<Vec<_>>()
    };

    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200">
            <input id="side-menu" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-1 gap-2">
                        <label for="side-menu" class="btn btn-ghost btn-square lg:hidden">"☰"</label>
                        <span class="text-xl font-bold">{move || auth.route.get().title()}</span>
                    </div>
                    <div class="flex-none gap-2">
                        <span class="badge badge-neutral">{move || auth.display_name()}</span>
                        <span class="badge badge-outline hidden md:inline-flex">
                            {move || auth.session.with(|s| {
                                s.profile.as_ref().map(|p| p.role.label()).unwrap_or_default()
                            })}
                        </span>
                        <button on:click=move |_| logout(auth) class="btn btn-outline btn-error btn-sm">
                            "退出登录"
                        </button>
                    </div>
                </div>
                <main class="p-4 md:p-8 space-y-6">{children()}</main>
            </div>
            <div class="drawer-side">
                <label for="side-menu" class="drawer-overlay"></label>
                <aside class="w-60 min-h-full bg-base-100">
                    <div class="p-4 text-lg font-bold text-primary">"智慧校园能耗监测"</div>
                    <ul class="menu p-2">
                        <For
                            each=menu
                            key=|r| *r
                            children=move |r| {
                                view! {
                                    <li>
                                        <a
                                            class=move || if auth.route.get() == r { "active" } else { "" }
                                            on:click=move |_| auth.navigate(r)
                                        >
                                            {r.title()}
                                        </a>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </aside>
            </div>
        </div>
    }
}
