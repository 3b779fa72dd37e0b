use campus_energy::Notice;
use campus_energy::api::{building, device};
use campus_energy::shared::validate::{parse_number, validate_power, validate_serial_number};
use campus_energy::shared::{Building, Device, DeviceRequest, DeviceStatus};
use leptos::prelude::*;
use std::time::Duration;

use crate::auth::use_auth;
use crate::web::Debouncer;

const STATUSES: [DeviceStatus; 4] = [
    DeviceStatus::Online,
    DeviceStatus::Offline,
    DeviceStatus::Maintenance,
    DeviceStatus::Decommissioned,
];

fn parse_status(raw: &str) -> Option<DeviceStatus> {
    STATUSES.into_iter().find(|s| s.as_str() == raw)
}

fn status_badge(status: Option<DeviceStatus>) -> &'static str {
    match status {
        Some(DeviceStatus::Online) => "badge badge-success",
        Some(DeviceStatus::Offline) => "badge badge-ghost",
        Some(DeviceStatus::Maintenance) => "badge badge-warning",
        Some(DeviceStatus::Decommissioned) | None => "badge badge-neutral",
    }
}

/// 新增设备表单校验
fn build_request(
    name: &str,
    serial: &str,
    building_id: &str,
    room: &str,
    power: &str,
) -> Result<DeviceRequest, &'static str> {
    if name.trim().is_empty() {
        return Err("请输入设备名称");
    }
    if !validate_serial_number(serial) {
        return Err("序列号只能包含大写字母、数字和下划线，且至少 3 位");
    }
    let building_id = building_id.parse::<i64>().map_err(|_| "请选择所属建筑")?;
    let rated_power = parse_number(power)
        .filter(|p| validate_power(*p))
        .ok_or("额定功率应在 0 ~ 100000 之间")?;

    Ok(DeviceRequest {
        name: name.trim().to_string(),
        serial_number: serial.to_string(),
        building_id,
        room_number: room.trim().to_string(),
        rated_power,
        status: DeviceStatus::Online,
        usage_description: None,
    })
}

#[component]
pub fn DevicePage() -> impl IntoView {
    let auth = use_auth();

    let devices = RwSignal::new(Vec::<Device>::new());
    let buildings = RwSignal::new(Vec::<Building>::new());
    let building_filter = RwSignal::new(String::new());
    let keyword = RwSignal::new(String::new());
    let applied_keyword = RwSignal::new(String::new());
    let search = Debouncer::new(Duration::from_millis(300));

    let name = RwSignal::new(String::new());
    let serial = RwSignal::new(String::new());
    let building_id = RwSignal::new(String::new());
    let room = RwSignal::new(String::new());
    let power = RwSignal::new(String::new());

    let load = move || {
        let endpoint = match building_filter.get_untracked().parse::<i64>() {
            Ok(id) => device::by_building(id),
            Err(_) => device::list(),
        };
        auth.request(endpoint, move |res| {
            if let Ok(data) = res {
                devices.set(data);
            }
        });
    };

    load();
    auth.request(building::list(), move |res| {
        if let Ok(data) = res {
            buildings.set(data);
        }
    });

    let visible = move || {
        let kw = applied_keyword.get().to_lowercase();
        devices.with(|list| {
            list.iter()
                .filter(|d| {
                    kw.is_empty()
                        || d.name.to_lowercase().contains(&kw)
                        || d.serial_number.as_deref().is_some_and(|s| s.to_lowercase().contains(&kw))
                })
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let on_keyword = move |ev: leptos::web_sys::Event| {
        keyword.set(event_target_value(&ev));
        search.call(move || applied_keyword.set(keyword.get_untracked()));
    };

    let on_create = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = build_request(&name.get(), &serial.get(), &building_id.get(), &room.get(), &power.get());
        match request {
            Err(msg) => auth.notify(Notice::warning(msg)),
            Ok(body) => auth.request(device::create(&body), move |res| {
                if res.is_ok() {
                    auth.notify(Notice::success("设备创建成功"));
                    name.set(String::new());
                    serial.set(String::new());
                    load();
                }
            }),
        }
    };

    let on_status = move |id: i64, raw: String| {
        let Some(status) = parse_status(&raw) else {
            return;
        };
        auth.request(device::update_status(id, status), move |res| {
            if let Ok(updated) = res {
                devices.update(|list| {
                    if let Some(d) = list.iter_mut().find(|d| d.id == id) {
                        *d = updated;
                    }
                });
            }
        });
    };

    let on_delete = move |id: i64| {
        auth.request(device::delete(id), move |res| {
            if res.is_ok() {
                auth.notify(Notice::success("设备已删除"));
                devices.update(|list| list.retain(|d| d.id != id));
            }
        });
    };

    let building_options = move || {
        view! {
            <For
                each=move || buildings.get()
                key=|b| b.id
                children=move |b| view! { <option value=b.id.to_string()>{b.name.clone()}</option> }
            />
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body flex flex-row flex-wrap items-end gap-4" on:submit=on_create>
                <input class="input input-bordered" placeholder="设备名称"
                    on:input=move |ev| name.set(event_target_value(&ev)) prop:value=name />
                <input class="input input-bordered font-mono" placeholder="序列号 (如 EM_0001)"
                    on:input=move |ev| serial.set(event_target_value(&ev)) prop:value=serial />
                <select class="select select-bordered" on:change=move |ev| building_id.set(event_target_value(&ev))>
                    <option value="">"所属建筑"</option>
                    {building_options()}
                </select>
                <input class="input input-bordered w-28" placeholder="房间号"
                    on:input=move |ev| room.set(event_target_value(&ev)) prop:value=room />
                <input class="input input-bordered w-32" placeholder="额定功率 kW" type="number"
                    on:input=move |ev| power.set(event_target_value(&ev)) prop:value=power />
                <button class="btn btn-primary">"新增设备"</button>
            </form>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex flex-wrap items-center gap-4 p-6 pb-2">
                    <select
                        class="select select-bordered select-sm"
                        on:change=move |ev| {
                            building_filter.set(event_target_value(&ev));
                            load();
                        }
                    >
                        <option value="">"全部建筑"</option>
                        {building_options()}
                    </select>
                    <input
                        class="input input-bordered input-sm"
                        placeholder="按名称或序列号搜索"
                        on:input=on_keyword
                        prop:value=keyword
                    />
                </div>
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"名称"</th>
                                <th>"序列号"</th>
                                <th>"位置"</th>
                                <th>"额定功率 (kW)"</th>
                                <th>"状态"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=visible
                                key=|d| (d.id, d.status)
                                children=move |d| {
                                    let id = d.id;
                                    let current = d.status.map(|s| s.as_str()).unwrap_or_default();
                                    view! {
                                        <tr>
                                            <td class="font-bold">{d.name.clone()}</td>
                                            <td class="font-mono text-sm">{d.serial_number.clone().unwrap_or_default()}</td>
                                            <td>
                                                {d.building_name.clone().unwrap_or_default()} " "
                                                {d.room_number.clone().unwrap_or_default()}
                                            </td>
                                            <td>{d.rated_power.map(|p| format!("{:.1}", p)).unwrap_or_default()}</td>
                                            <td>
                                                <span class=status_badge(d.status)>
                                                    {d.status.map(|s| s.label()).unwrap_or("未知")}
                                                </span>
                                            </td>
                                            <td class="flex gap-2">
                                                <select
                                                    class="select select-bordered select-xs"
                                                    on:change=move |ev| on_status(id, event_target_value(&ev))
                                                >
                                                    {STATUSES
                                                        .into_iter()
                                                        .map(|s| view! {
                                                            <option value=s.as_str() selected=s.as_str() == current>{s.label()}</option>
                                                        })
                                                        .collect_view()}
                                                </select>
                                                <button class="btn btn-ghost btn-xs text-error" on:click=move |_| on_delete(id)>
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
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_values_round_trip() {
        for s in STATUSES {
            assert_eq!(parse_status(s.as_str()), Some(s));
        }
        assert_eq!(parse_status("BROKEN"), None);
    }

    #[test]
    fn create_form_validation() {
        assert_eq!(build_request("", "EM_1", "1", "101", "10").unwrap_err(), "请输入设备名称");
        assert!(build_request("总表", "em-1", "1", "101", "10").is_err());
        assert_eq!(build_request("总表", "EM_1", "", "101", "10").unwrap_err(), "请选择所属建筑");
        assert!(build_request("总表", "EM_1", "1", "101", "-5").is_err());

        let ok = build_request(" 总表 ", "EM_1", "1", "101", "12.5").unwrap();
        assert_eq!(ok.name, "总表");
        assert_eq!(ok.building_id, 1);
        assert_eq!(ok.rated_power, 12.5);
    }
}
