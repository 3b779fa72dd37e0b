use campus_energy::Notice;
use campus_energy::api::auth as users_api;
use campus_energy::shared::{Role, User, UserUpdate};
use leptos::prelude::*;

use crate::auth::use_auth;

/// 用户管理（仅管理员，由路由守卫保证）
#[component]
pub fn UserPage() -> impl IntoView {
    let auth = use_auth();

    let users = RwSignal::new(Vec::<User>::new());
    let loading = RwSignal::new(true);
    let own_id = move || auth.session.with(|s| s.profile.as_ref().map(|p| p.user_id));

    auth.request(users_api::users(), move |res| {
        if let Ok(data) = res {
            users.set(data);
        }
        loading.set(false);
    });

    let apply = move |id: i64, body: UserUpdate| {
        auth.request(users_api::update_user(id, &body), move |res| {
            if let Ok(updated) = res {
                auth.notify(Notice::success("用户已更新"));
                users.update(|list| {
                    if let Some(u) = list.iter_mut().find(|u| u.id == id) {
                        *u = updated;
                    }
                });
            }
        });
    };

    let on_delete = move |id: i64| {
        auth.request(users_api::delete_user(id), move |res| {
            if res.is_ok() {
                auth.notify(Notice::success("用户已删除"));
                users.update(|list| list.retain(|u| u.id != id));
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"用户名"</th>
                            <th>"姓名"</th>
                            <th>"邮箱"</th>
                            <th>"手机号"</th>
                            <th>"角色"</th>
                            <th>"状态"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || loading.get()>
                            <tr>
                                <td colspan="7" class="text-center py-8">
                                    <span class="loading loading-spinner loading-md"></span>
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || users.get()
                            key=|u| (u.id, u.role, u.enabled)
                            children=move |u| {
                                let id = u.id;
                                let role = u.role.unwrap_or_default();
                                let enabled = u.enabled.unwrap_or(true);
                                let is_self = move || own_id() == Some(id);
                                let flip_role = match role {
                                    Role::Admin => Role::User,
                                    Role::User => Role::Admin,
                                };
                                view! {
                                    <tr>
                                        <td class="font-bold">{u.username.clone()}</td>
                                        <td>{u.real_name.clone().unwrap_or_default()}</td>
                                        <td>{u.email.clone().unwrap_or_default()}</td>
                                        <td>{u.phone.clone().unwrap_or_default()}</td>
                                        <td>
                                            <span class=if role == Role::Admin { "badge badge-primary" } else { "badge badge-ghost" }>
                                                {role.label()}
                                            </span>
                                        </td>
                                        <td>{if enabled { "启用" } else { "禁用" }}</td>
                                        <td class="flex gap-2">
                                            <button
                                                class="btn btn-ghost btn-xs"
                                                disabled=is_self
                                                on:click=move |_| apply(id, UserUpdate { role: Some(flip_role), ..Default::default() })
                                            >
                                                {format!("设为{}", flip_role.label())}
                                            </button>
                                            <button
                                                class="btn btn-ghost btn-xs"
                                                disabled=is_self
                                                on:click=move |_| apply(id, UserUpdate { enabled: Some(!enabled), ..Default::default() })
                                            >
                                                {if enabled { "禁用" } else { "启用" }}
                                            </button>
                                            <button
                                                class="btn btn-ghost btn-xs text-error"
                                                disabled=is_self
                                                on:click=move |_| on_delete(id)
                                            >
                                                "删除"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </div>
    }
}
