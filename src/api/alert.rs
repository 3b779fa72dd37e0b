use campus_energy_shared::protocol::Endpoint;
use campus_energy_shared::{Alert, Page, PageQuery};
use serde_json::Value;

use super::paged;

/// 全部告警（分页）
pub fn list(query: PageQuery) -> Endpoint<Page<Alert>> {
    paged(Endpoint::get("/alerts"), query)
}

pub fn by_device(device_id: i64, query: PageQuery) -> Endpoint<Page<Alert>> {
    paged(Endpoint::get(format!("/alerts/device/{}", device_id)), query)
}

pub fn unresolved() -> Endpoint<Vec<Alert>> {
    Endpoint::get("/alerts/unresolved")
}

pub fn recent() -> Endpoint<Vec<Alert>> {
    Endpoint::get("/alerts/recent")
}

pub fn count_today() -> Endpoint<i64> {
    Endpoint::get("/alerts/count/today")
}

pub fn count_unresolved() -> Endpoint<i64> {
    Endpoint::get("/alerts/count/unresolved")
}

/// 按告警类型统计，结构由后端决定
pub fn stats_by_type() -> Endpoint<Value> {
    Endpoint::get("/alerts/stats/type")
}

/// 处理告警，备注通过查询参数 `resolveNote` 传递；返回处理后的告警
pub fn resolve(id: i64, note: &str) -> Endpoint<Alert> {
    Endpoint::post(format!("/alerts/{}/resolve", id)).query("resolveNote", note)
}
