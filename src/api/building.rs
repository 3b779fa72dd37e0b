use campus_energy_shared::protocol::Endpoint;
use campus_energy_shared::{Building, BuildingRequest};

pub fn list() -> Endpoint<Vec<Building>> {
    Endpoint::get("/buildings")
}

pub fn get(id: i64) -> Endpoint<Building> {
    Endpoint::get(format!("/buildings/{}", id))
}

pub fn categories() -> Endpoint<Vec<String>> {
    Endpoint::get("/buildings/categories")
}

pub fn create(body: &BuildingRequest) -> Endpoint<Building> {
    Endpoint::post("/buildings").json(body)
}

pub fn update(id: i64, body: &BuildingRequest) -> Endpoint<Building> {
    Endpoint::put(format!("/buildings/{}", id)).json(body)
}

pub fn delete(id: i64) -> Endpoint<()> {
    Endpoint::delete(format!("/buildings/{}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_energy_shared::protocol::HttpMethod;
    use serde_json::json;

    #[test]
    fn crud_paths() {
        assert_eq!(list().path, "/buildings");
        assert_eq!(get(8).path, "/buildings/8");
        assert_eq!(categories().path, "/buildings/categories");
        assert_eq!(delete(8).method, HttpMethod::Delete);
    }

    #[test]
    fn optional_fields_are_omitted() {
        let body = BuildingRequest {
            name: "实验楼".into(),
            floor_count: Some(5),
            ..Default::default()
        };
        let ep = update(2, &body);
        assert_eq!(ep.method, HttpMethod::Put);
        assert_eq!(ep.body, Some(json!({ "name": "实验楼", "floorCount": 5 })));
        assert_eq!(create(&body).method, HttpMethod::Post);
    }
}
