use campus_energy::api::{alert, energy, statistics};
use campus_energy::shared::date::{display_date_time, from_now, parse_date_time};
use campus_energy::shared::{Alert, EnergyReading, OverviewStatistics};
use leptos::prelude::*;
use std::time::Duration;

use crate::auth::use_auth;
use crate::web::Throttled;

fn kwh(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

fn relative(raw: &Option<String>) -> String {
    raw.as_deref()
        .and_then(parse_date_time)
        .map(|dt| from_now(&dt))
        .unwrap_or_default()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    let overview = RwSignal::new(OverviewStatistics::default());
    let readings = RwSignal::new(Vec::<EnergyReading>::new());
    let alerts = RwSignal::new(Vec::<Alert>::new());
    let loading = RwSignal::new(false);
    let refresh_gate = Throttled::new(Duration::from_secs(2));

    let load = move || {
        loading.set(true);
        auth.request(statistics::overview(), move |res| {
            if let Ok(data) = res {
                overview.set(data);
            }
            loading.set(false);
        });
        auth.request(energy::latest_all(), move |res| {
            if let Ok(data) = res {
                readings.set(data);
            }
        });
        auth.request(alert::recent(), move |res| {
            if let Ok(data) = res {
                alerts.set(data);
            }
        });
    };

    // 初始加载
    load();

    let on_refresh = move |_| {
        if refresh_gate.allow() {
            load();
        }
    };

    let stat = move |title: &'static str, value: Signal<String>, class: &'static str| {
        view! {
            <div class="stat">
                <div class="stat-title">{title}</div>
                <div class=format!("stat-value {}", class)>{value}</div>
            </div>
        }
    };

    view! {
        <div class="flex justify-end">
            <button on:click=on_refresh disabled=move || loading.get() class="btn btn-ghost btn-sm">
                {move || if loading.get() { "刷新中..." } else { "刷新" }}
            </button>
        </div>

        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            {stat("建筑数量", Signal::derive(move || overview.get().building_count.to_string()), "text-primary")}
            {stat(
                "在线设备",
                Signal::derive(move || overview.with(|o| format!("{} / {}", o.online_device_count, o.device_count))),
                "text-success",
            )}
            {stat("今日告警", Signal::derive(move || overview.get().today_alert_count.to_string()), "text-warning")}
            {stat("未处理告警", Signal::derive(move || overview.get().unresolved_alert_count.to_string()), "text-error")}
            {stat("今日用电 (kWh)", Signal::derive(move || kwh(overview.get().today_total_energy)), "text-secondary")}
        </div>

        <div class="grid grid-cols-1 xl:grid-cols-2 gap-6">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <h3 class="card-title p-6 pb-2">"设备最新读数"</h3>
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"设备"</th>
                                    <th>"功率 (kW)"</th>
                                    <th>"累计电量 (kWh)"</th>
                                    <th>"采集时间"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || readings.with(|r| r.is_empty())>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">"暂无数据"</td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || readings.get()
                                    key=|r| (r.device_id, r.collect_time.clone())
                                    children=move |r| {
                                        view! {
                                            <tr>
                                                <td>{r.device_name.clone().unwrap_or_default()}</td>
                                                <td>{kwh(r.power)}</td>
                                                <td>{kwh(r.total_energy)}</td>
                                                <td class="text-xs opacity-70">{relative(&r.collect_time)}</td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <h3 class="card-title p-6 pb-2">"最近告警"</h3>
                    <ul class="menu w-full">
                        <Show when=move || alerts.with(|a| a.is_empty())>
                            <li class="text-center py-8 text-base-content/50">"暂无告警"</li>
                        </Show>
                        <For
                            each=move || alerts.get()
                            key=|a| a.id
                            children=move |a| {
                                let resolved = a.is_resolved.unwrap_or(false);
                                view! {
                                    <li class="flex flex-row justify-between">
                                        <span>
                                            <span class=if resolved { "badge badge-success mr-2" } else { "badge badge-error mr-2" }>
                                                {if resolved { "已处理" } else { "未处理" }}
                                            </span>
                                            {a.device_name.clone().unwrap_or_default()} " "
                                            {a.description.clone().unwrap_or_default()}
                                        </span>
                                        <span class="text-xs opacity-60">
                                            {a.trigger_time.as_deref().map(display_date_time).unwrap_or_default()}
                                        </span>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </div>
            </div>
        </div>
    }
}
