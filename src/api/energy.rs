use campus_energy_shared::protocol::Endpoint;
use campus_energy_shared::{EnergyReading, Page, PageQuery};

use super::paged;

fn device_path(device_id: i64, tail: &str) -> String {
    format!("/energy-data/device/{}{}", device_id, tail)
}

/// 设备的历史读数（分页）
pub fn by_device(device_id: i64, query: PageQuery) -> Endpoint<Page<EnergyReading>> {
    paged(Endpoint::get(device_path(device_id, "")), query)
}

/// 尚无读数时 `data` 为空
pub fn latest(device_id: i64) -> Endpoint<Option<EnergyReading>> {
    Endpoint::get(device_path(device_id, "/latest"))
}

pub fn today(device_id: i64) -> Endpoint<Vec<EnergyReading>> {
    Endpoint::get(device_path(device_id, "/today"))
}

/// 时间格式为后端的 `LocalDateTime`，例如 `2024-05-01T00:00:00`
pub fn range(device_id: i64, start: &str, end: &str) -> Endpoint<Vec<EnergyReading>> {
    Endpoint::get(device_path(device_id, "/range"))
        .query("startTime", start)
        .query("endTime", end)
}

pub fn latest_all() -> Endpoint<Vec<EnergyReading>> {
    Endpoint::get("/energy-data/latest-all")
}

/// 区间用电量（kWh）
pub fn consumption(device_id: i64, start: &str, end: &str) -> Endpoint<Option<f64>> {
    Endpoint::get(device_path(device_id, "/consumption"))
        .query("startTime", start)
        .query("endTime", end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_scoped_paths() {
        assert_eq!(by_device(7, PageQuery::default()).path, "/energy-data/device/7");
        assert_eq!(latest(7).path, "/energy-data/device/7/latest");
        assert_eq!(today(7).path, "/energy-data/device/7/today");
        assert_eq!(latest_all().path, "/energy-data/latest-all");
    }

    #[test]
    fn time_window_query() {
        let ep = consumption(7, "2024-05-01T00:00:00", "2024-05-02T00:00:00");
        assert_eq!(ep.path, "/energy-data/device/7/consumption");
        assert_eq!(
            ep.query,
            vec![
                ("startTime".to_string(), "2024-05-01T00:00:00".to_string()),
                ("endTime".to_string(), "2024-05-02T00:00:00".to_string()),
            ]
        );
        assert_eq!(range(7, "a", "b").query.len(), 2);
    }
}
