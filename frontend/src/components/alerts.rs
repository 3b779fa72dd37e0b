use campus_energy::Notice;
use campus_energy::api::alert;
use campus_energy::shared::date::display_date_time;
use campus_energy::shared::{Alert, PageQuery};
use leptos::prelude::*;

use crate::auth::use_auth;

const DEFAULT_RESOLVE_NOTE: &str = "已处理";

/// 只看未处理时走单独的接口，否则分页查询全部
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Unresolved,
    All,
}

#[component]
pub fn AlertPage() -> impl IntoView {
    let auth = use_auth();

    let alerts = RwSignal::new(Vec::<Alert>::new());
    let scope = RwSignal::new(Scope::Unresolved);
    let page = RwSignal::new(PageQuery::default());
    let total_pages = RwSignal::new(0_u32);
    let unresolved_count = RwSignal::new(0_i64);
    let today_count = RwSignal::new(0_i64);
    let note = RwSignal::new(String::new());

    let load_counts = move || {
        auth.request(alert::count_unresolved(), move |res| {
            if let Ok(n) = res {
                unresolved_count.set(n);
            }
        });
        auth.request(alert::count_today(), move |res| {
            if let Ok(n) = res {
                today_count.set(n);
            }
        });
    };

    Effect::new(move |_| match scope.get() {
        Scope::Unresolved => auth.request(alert::unresolved(), move |res| {
            if let Ok(data) = res {
                alerts.set(data);
            }
        }),
        Scope::All => auth.request(alert::list(page.get()), move |res| {
            if let Ok(data) = res {
                total_pages.set(data.total_pages);
                alerts.set(data.content);
            }
        }),
    });
    load_counts();

    let on_resolve = move |id: i64| {
        let text = note.get_untracked();
        let text = if text.trim().is_empty() {
            DEFAULT_RESOLVE_NOTE.to_string()
        } else {
            text.trim().to_string()
        };
        auth.request(alert::resolve(id, &text), move |res| {
            if let Ok(updated) = res {
                auth.notify(Notice::success("告警已处理"));
                alerts.update(|list| {
                    if scope.get_untracked() == Scope::Unresolved {
                        list.retain(|a| a.id != id);
                    } else if let Some(a) = list.iter_mut().find(|a| a.id == id) {
                        *a = updated;
                    }
                });
                load_counts();
            }
        });
    };

    let tab = move |label: &'static str, value: Scope| {
        view! {
            <a
                role="tab"
                class=move || if scope.get() == value { "tab tab-active" } else { "tab" }
                on:click=move |_| {
                    page.set(PageQuery::default());
                    scope.set(value);
                }
            >
                {label}
            </a>
        }
    };

    view! {
        <div class="stats shadow bg-base-100">
            <div class="stat">
                <div class="stat-title">"今日告警"</div>
                <div class="stat-value text-warning">{move || today_count.get()}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"未处理"</div>
                <div class="stat-value text-error">{move || unresolved_count.get()}</div>
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex flex-wrap items-center justify-between gap-4 p-6 pb-2">
                    <div role="tablist" class="tabs tabs-boxed">
                        {tab("未处理", Scope::Unresolved)}
                        {tab("全部", Scope::All)}
                    </div>
                    <input
                        class="input input-bordered input-sm w-64"
                        placeholder="处理备注（默认：已处理）"
                        on:input=move |ev| note.set(event_target_value(&ev))
                        prop:value=note
                    />
                </div>
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"设备"</th>
                                <th>"类型"</th>
                                <th>"描述"</th>
                                <th>"数值 / 阈值"</th>
                                <th>"触发时间"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || alerts.with(|a| a.is_empty())>
                                <tr>
                                    <td colspan="6" class="text-center py-8 text-base-content/50">"暂无告警"</td>
                                </tr>
                            </Show>
                            <For
                                each=move || alerts.get()
                                key=|a| (a.id, a.is_resolved)
                                children=move |a| {
                                    let id = a.id;
                                    let resolved = a.is_resolved.unwrap_or(false);
                                    let value = |v: Option<f64>| v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".into());
                                    view! {
                                        <tr>
                                            <td>{a.device_name.clone().unwrap_or_default()}</td>
                                            <td><span class="badge badge-outline">{a.alert_type.clone().unwrap_or_default()}</span></td>
                                            <td>{a.description.clone().unwrap_or_default()}</td>
                                            <td class="font-mono text-sm">
                                                {value(a.alert_value)} " / " {value(a.threshold_value)}
                                            </td>
                                            <td class="text-xs">
                                                {a.trigger_time.as_deref().map(display_date_time).unwrap_or_default()}
                                            </td>
                                            <td>
                                                <Show
                                                    when=move || !resolved
                                                    fallback=|| view! { <span class="badge badge-success">"已处理"</span> }
                                                >
                                                    <button class="btn btn-primary btn-xs" on:click=move |_| on_resolve(id)>
                                                        "处理"
                                                    </button>
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
                <Show when=move || scope.get() == Scope::All>
                    <div class="flex justify-center items-center gap-4 p-4">
                        <button
                            class="btn btn-sm"
                            disabled=move || page.get().page == 0
                            on:click=move |_| page.update(|q| q.page = q.page.saturating_sub(1))
                        >
                            "上一页"
                        </button>
                        <span class="text-sm">
                            {move || format!("第 {} / {} 页", page.get().page + 1, total_pages.get().max(1))}
                        </span>
                        <button
                            class="btn btn-sm"
                            disabled=move || page.get().page + 1 >= total_pages.get()
                            on:click=move |_| page.update(|q| q.page += 1)
                        >
                            "下一页"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
