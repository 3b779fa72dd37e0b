use campus_energy_shared::protocol::Endpoint;
use campus_energy_shared::{Device, DeviceRequest, DeviceStatus};

pub fn list() -> Endpoint<Vec<Device>> {
    Endpoint::get("/devices")
}

pub fn get(id: i64) -> Endpoint<Device> {
    Endpoint::get(format!("/devices/{}", id))
}

pub fn by_building(building_id: i64) -> Endpoint<Vec<Device>> {
    Endpoint::get(format!("/devices/building/{}", building_id))
}

pub fn online() -> Endpoint<Vec<Device>> {
    Endpoint::get("/devices/online")
}

pub fn create(body: &DeviceRequest) -> Endpoint<Device> {
    Endpoint::post("/devices").json(body)
}

pub fn update(id: i64, body: &DeviceRequest) -> Endpoint<Device> {
    Endpoint::put(format!("/devices/{}", id)).json(body)
}

/// 只修改状态，状态值通过查询参数传递
pub fn update_status(id: i64, status: DeviceStatus) -> Endpoint<Device> {
    Endpoint::patch(format!("/devices/{}/status", id)).query("status", status.as_str())
}

pub fn delete(id: i64) -> Endpoint<()> {
    Endpoint::delete(format!("/devices/{}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_energy_shared::protocol::HttpMethod;

    #[test]
    fn paths() {
        assert_eq!(get(42).path, "/devices/42");
        assert_eq!(by_building(3).path, "/devices/building/3");
        assert_eq!(online().path, "/devices/online");
        assert_eq!(list().method, HttpMethod::Get);
    }

    #[test]
    fn status_patch() {
        let ep = update_status(42, DeviceStatus::Maintenance);
        assert_eq!(ep.method, HttpMethod::Patch);
        assert_eq!(ep.path, "/devices/42/status");
        assert_eq!(ep.query, vec![("status".to_string(), "MAINTENANCE".to_string())]);
        assert!(ep.body.is_none());
    }

    #[test]
    fn create_serializes_status() {
        let ep = create(&DeviceRequest {
            name: "1F 总表".into(),
            serial_number: "EM_0001".into(),
            building_id: 1,
            room_number: "101".into(),
            rated_power: 15.5,
            status: DeviceStatus::Online,
            usage_description: None,
        });
        let body = ep.body.unwrap();
        assert_eq!(body["serialNumber"], "EM_0001");
        assert_eq!(body["status"], "ONLINE");
        assert!(body.get("usageDescription").is_none());
    }
}
