use campus_energy::Notice;
use campus_energy::api::building;
use campus_energy::shared::validate::parse_number;
use campus_energy::shared::{Building, BuildingRequest};
use leptos::prelude::*;

use crate::auth::use_auth;

#[component]
pub fn BuildingPage() -> impl IntoView {
    let auth = use_auth();

    let buildings = RwSignal::new(Vec::<Building>::new());
    let categories = RwSignal::new(Vec::<String>::new());
    let loading = RwSignal::new(true);

    let name = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let floors = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());

    let load = move || {
        loading.set(true);
        auth.request(building::list(), move |res| {
            if let Ok(data) = res {
                buildings.set(data);
            }
            loading.set(false);
        });
    };

    load();
    auth.request(building::categories(), move |res| {
        if let Ok(data) = res {
            categories.set(data);
        }
    });

    let on_create = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if name.get().trim().is_empty() {
            auth.notify(Notice::warning("请输入建筑名称"));
            return;
        }
        let optional = |s: String| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        let body = BuildingRequest {
            name: name.get().trim().to_string(),
            location_code: optional(location.get()),
            floor_count: parse_number(&floors.get()).map(|f| f as i32),
            category: optional(category.get()),
            description: None,
        };
        auth.request(building::create(&body), move |res| {
            if res.is_ok() {
                auth.notify(Notice::success("建筑创建成功"));
                name.set(String::new());
                floors.set(String::new());
                location.set(String::new());
                load();
            }
        });
    };

    let on_delete = move |id: i64| {
        auth.request(building::delete(id), move |res| {
            if res.is_ok() {
                auth.notify(Notice::success("建筑已删除"));
                buildings.update(|list| list.retain(|b| b.id != id));
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body flex flex-row flex-wrap items-end gap-4" on:submit=on_create>
                <input class="input input-bordered" placeholder="建筑名称"
                    on:input=move |ev| name.set(event_target_value(&ev)) prop:value=name />
                <input class="input input-bordered" placeholder="位置编码"
                    on:input=move |ev| location.set(event_target_value(&ev)) prop:value=location />
                <input class="input input-bordered w-28" placeholder="楼层数" type="number"
                    on:input=move |ev| floors.set(event_target_value(&ev)) prop:value=floors />
                <select class="select select-bordered" on:change=move |ev| category.set(event_target_value(&ev))>
                    <option value="">"选择分类"</option>
                    <For
                        each=move || categories.get()
                        key=|c| c.clone()
                        children=move |c| view! { <option value=c.clone()>{c.clone()}</option> }
                    />
                </select>
                <button class="btn btn-primary">"新增建筑"</button>
            </form>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"名称"</th>
                            <th>"位置编码"</th>
                            <th>"分类"</th>
                            <th>"楼层"</th>
                            <th>"设备数"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || loading.get() && buildings.with(|b| b.is_empty())>
                            <tr>
                                <td colspan="6" class="text-center py-8 text-base-content/50">
                                    <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || buildings.get()
                            key=|b| b.id
                            children=move |b| {
                                let id = b.id;
                                view! {
                                    <tr>
                                        <td class="font-bold">{b.name.clone()}</td>
                                        <td class="font-mono text-sm">{b.location_code.clone().unwrap_or_default()}</td>
                                        <td>{b.category.clone().unwrap_or_default()}</td>
                                        <td>{b.floor_count.map(|f| f.to_string()).unwrap_or_default()}</td>
                                        <td>{b.device_count.unwrap_or(0)}</td>
                                        <td>
                                            <button class="btn btn-ghost btn-sm text-error" on:click=move |_| on_delete(id)>
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
