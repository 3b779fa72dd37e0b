use campus_energy::api::{device, energy};
use campus_energy::shared::date::{DateRange, display_date_time};
use campus_energy::shared::{Device, EnergyReading, Page, PageQuery};
use leptos::prelude::*;

use crate::auth::use_auth;

/// 日期区间转换为后端需要的 `LocalDateTime` 边界
fn window(range: &DateRange) -> (String, String) {
    (
        format!("{}T00:00:00", range.start_date),
        format!("{}T23:59:59", range.end_date),
    )
}

fn fixed(value: Option<f64>, digits: usize) -> String {
    value
        .map(|v| format!("{:.*}", digits, v))
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn EnergyPage() -> impl IntoView {
    let auth = use_auth();

    let devices = RwSignal::new(Vec::<Device>::new());
    let selected = RwSignal::new(Option::<i64>::None);
    let days = RwSignal::new(DateRange::DEFAULT_DAYS);
    let page = RwSignal::new(PageQuery::default());
    let history = RwSignal::new(Page::<EnergyReading> {
        content: Vec::new(),
        total_elements: 0,
        total_pages: 0,
        number: 0,
        size: PageQuery::DEFAULT_SIZE,
    });
    let latest = RwSignal::new(Option::<EnergyReading>::None);
    let consumption = RwSignal::new(Option::<f64>::None);

    auth.request(device::list(), move |res| {
        if let Ok(data) = res {
            if selected.get_untracked().is_none() {
                selected.set(data.first().map(|d| d.id));
            }
            devices.set(data);
        }
    });

    // 切换设备、区间或页码时重新加载
    Effect::new(move |_| {
        let Some(id) = selected.get() else {
            return;
        };
        let (start, end) = window(&DateRange::last_days(days.get()));

        auth.request(energy::by_device(id, page.get()), move |res| {
            if let Ok(data) = res {
                history.set(data);
            }
        });
        auth.request(energy::latest(id), move |res| {
            if let Ok(data) = res {
                latest.set(data);
            }
        });
        auth.request(energy::consumption(id, &start, &end), move |res| {
            if let Ok(data) = res {
                consumption.set(data);
            }
        });
    });

    let on_device = move |ev: leptos::web_sys::Event| {
        selected.set(event_target_value(&ev).parse::<i64>().ok());
        page.set(PageQuery::default());
    };

    let turn = move |delta: i64| {
        let total = i64::from(history.with(|h| h.total_pages));
        page.update(|q| {
            let next = i64::from(q.page) + delta;
            if next >= 0 && next < total {
                q.page = next as u32;
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body flex flex-row flex-wrap items-center gap-4">
                <select class="select select-bordered" on:change=on_device>
                    <For
                        each=move || devices.get()
                        key=|d| d.id
                        children=move |d| {
                            let id = d.id;
                            view! {
                                <option value=id.to_string() selected=move || selected.get() == Some(id)>
                                    {d.name.clone()}
                                </option>
                            }
                        }
                    />
                </select>
                <div class="join">
                    {[1_i64, 7, 30]
                        .into_iter()
                        .map(|n| view! {
                            <button
                                class=move || if days.get() == n { "btn btn-sm join-item btn-active" } else { "btn btn-sm join-item" }
                                on:click=move |_| days.set(n)
                            >
                                {format!("近 {} 天", n)}
                            </button>
                        })
                        .collect_view()}
                </div>
            </div>
        </div>

        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-title">"区间用电量 (kWh)"</div>
                <div class="stat-value text-primary">{move || fixed(consumption.get(), 2)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"当前功率 (kW)"</div>
                <div class="stat-value">{move || fixed(latest.with(|r| r.as_ref().and_then(|r| r.power)), 2)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"电压 (V)"</div>
                <div class="stat-value">{move || fixed(latest.with(|r| r.as_ref().and_then(|r| r.voltage)), 1)}</div>
                <div class="stat-desc">
                    {move || latest.with(|r| {
                        r.as_ref()
                            .and_then(|r| r.collect_time.as_deref())
                            .map(display_date_time)
                            .unwrap_or_default()
                    })}
                </div>
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"采集时间"</th>
                            <th>"电压 (V)"</th>
                            <th>"电流 (A)"</th>
                            <th>"功率 (kW)"</th>
                            <th>"累计电量 (kWh)"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || history.get().content
                            key=|r| (r.id, r.collect_time.clone())
                            children=move |r| {
                                view! {
                                    <tr>
                                        <td>{r.collect_time.as_deref().map(display_date_time).unwrap_or_default()}</td>
                                        <td>{fixed(r.voltage, 1)}</td>
                                        <td>{fixed(r.current, 2)}</td>
                                        <td>{fixed(r.power, 2)}</td>
                                        <td>{fixed(r.total_energy, 2)}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
            <div class="flex justify-center items-center gap-4 p-4">
                <button class="btn btn-sm" on:click=move |_| turn(-1)>"上一页"</button>
                <span class="text-sm">
                    {move || history.with(|h| format!("第 {} / {} 页，共 {} 条", h.number + 1, h.total_pages.max(1), h.total_elements))}
                </span>
                <button class="btn btn-sm" on:click=move |_| turn(1)>"下一页"</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_covers_whole_days() {
        let range = DateRange {
            start_date: "2024-05-01".into(),
            end_date: "2024-05-08".into(),
        };
        let (start, end) = window(&range);
        assert_eq!(start, "2024-05-01T00:00:00");
        assert_eq!(end, "2024-05-08T23:59:59");
    }

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(fixed(None, 2), "-");
        assert_eq!(fixed(Some(3.14159), 2), "3.14");
    }
}
