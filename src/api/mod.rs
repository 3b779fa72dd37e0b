//! 资源接口描述
//!
//! 每个函数都是纯映射：类型化参数 → `Endpoint`。
//! 不发请求、不处理错误，交给 `ApiClient::send` 执行。

pub mod alert;
pub mod auth;
pub mod building;
pub mod device;
pub mod energy;
pub mod statistics;

use campus_energy_shared::PageQuery;
use campus_energy_shared::protocol::Endpoint;

/// 附加分页参数 `page` / `size`
pub(crate) fn paged<R>(endpoint: Endpoint<R>, query: PageQuery) -> Endpoint<R> {
    endpoint.query("page", query.page).query("size", query.size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_energy_shared::protocol::HttpMethod;
    use campus_energy_shared::{
        BuildingRequest, DeviceRequest, DeviceStatus, LoginRequest, RegisterRequest, Role, UserUpdate,
    };
    use test_case::test_case;

    fn target<R>(endpoint: Endpoint<R>) -> (HttpMethod, String) {
        (endpoint.method, endpoint.path)
    }

    fn credentials() -> LoginRequest {
        LoginRequest {
            username: "li".into(),
            password: "Secret#123".into(),
        }
    }

    fn registration() -> RegisterRequest {
        RegisterRequest {
            username: "li".into(),
            password: "Secret#123".into(),
            email: "li@campus.edu".into(),
            real_name: None,
            phone: None,
            role: Role::User,
        }
    }

    #[test_case(target(alert::list(PageQuery::default())), HttpMethod::Get, "/alerts" ; "alert list")]
    #[test_case(target(alert::by_device(3, PageQuery::default())), HttpMethod::Get, "/alerts/device/3" ; "alert by device")]
    #[test_case(target(alert::unresolved()), HttpMethod::Get, "/alerts/unresolved" ; "alert unresolved")]
    #[test_case(target(alert::recent()), HttpMethod::Get, "/alerts/recent" ; "alert recent")]
    #[test_case(target(alert::count_today()), HttpMethod::Get, "/alerts/count/today" ; "alert count today")]
    #[test_case(target(alert::count_unresolved()), HttpMethod::Get, "/alerts/count/unresolved" ; "alert count unresolved")]
    #[test_case(target(alert::stats_by_type()), HttpMethod::Get, "/alerts/stats/type" ; "alert stats by type")]
    #[test_case(target(alert::resolve(4, "ok")), HttpMethod::Post, "/alerts/4/resolve" ; "alert resolve")]
    #[test_case(target(auth::login(&credentials())), HttpMethod::Post, "/auth/login" ; "auth login")]
    #[test_case(target(auth::register(&registration())), HttpMethod::Post, "/auth/register" ; "auth register")]
    #[test_case(target(auth::users()), HttpMethod::Get, "/auth/users" ; "auth users")]
    #[test_case(target(auth::update_user(5, &UserUpdate::default())), HttpMethod::Put, "/auth/users/5" ; "auth update user")]
    #[test_case(target(auth::delete_user(5)), HttpMethod::Delete, "/auth/users/5" ; "auth delete user")]
    #[test_case(target(building::list()), HttpMethod::Get, "/buildings" ; "building list")]
    #[test_case(target(building::get(2)), HttpMethod::Get, "/buildings/2" ; "building get")]
    #[test_case(target(building::categories()), HttpMethod::Get, "/buildings/categories" ; "building categories")]
    #[test_case(target(building::create(&BuildingRequest::default())), HttpMethod::Post, "/buildings" ; "building create")]
    #[test_case(target(building::update(2, &BuildingRequest::default())), HttpMethod::Put, "/buildings/2" ; "building update")]
    #[test_case(target(building::delete(2)), HttpMethod::Delete, "/buildings/2" ; "building delete")]
    #[test_case(target(device::list()), HttpMethod::Get, "/devices" ; "device list")]
    #[test_case(target(device::get(9)), HttpMethod::Get, "/devices/9" ; "device get")]
    #[test_case(target(device::by_building(2)), HttpMethod::Get, "/devices/building/2" ; "device by building")]
    #[test_case(target(device::online()), HttpMethod::Get, "/devices/online" ; "device online")]
    #[test_case(target(device::create(&DeviceRequest::default())), HttpMethod::Post, "/devices" ; "device create")]
    #[test_case(target(device::update(9, &DeviceRequest::default())), HttpMethod::Put, "/devices/9" ; "device update")]
    #[test_case(target(device::update_status(9, DeviceStatus::Offline)), HttpMethod::Patch, "/devices/9/status" ; "device update status")]
    #[test_case(target(device::delete(9)), HttpMethod::Delete, "/devices/9" ; "device delete")]
    #[test_case(target(energy::by_device(9, PageQuery::default())), HttpMethod::Get, "/energy-data/device/9" ; "energy by device")]
    #[test_case(target(energy::latest(9)), HttpMethod::Get, "/energy-data/device/9/latest" ; "energy latest")]
    #[test_case(target(energy::today(9)), HttpMethod::Get, "/energy-data/device/9/today" ; "energy today")]
    #[test_case(target(energy::range(9, "a", "b")), HttpMethod::Get, "/energy-data/device/9/range" ; "energy range")]
    #[test_case(target(energy::latest_all()), HttpMethod::Get, "/energy-data/latest-all" ; "energy latest all")]
    #[test_case(target(energy::consumption(9, "a", "b")), HttpMethod::Get, "/energy-data/device/9/consumption" ; "energy consumption")]
    #[test_case(target(statistics::overview()), HttpMethod::Get, "/statistics/overview" ; "statistics overview")]
    fn method_and_path(actual: (HttpMethod, String), method: HttpMethod, path: &str) {
        assert_eq!(actual, (method, path.to_string()));
    }

    #[test]
    fn paging_defaults() {
        let ep = paged(Endpoint::<()>::get("/x"), PageQuery::default());
        assert_eq!(
            ep.query,
            vec![("page".to_string(), "0".to_string()), ("size".to_string(), "20".to_string())]
        );
    }
}
