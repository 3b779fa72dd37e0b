use campus_energy_shared::protocol::Endpoint;
use campus_energy_shared::{LoginRequest, LoginResponse, RegisterRequest, User, UserUpdate};
use serde_json::Value;

pub fn login(body: &LoginRequest) -> Endpoint<LoginResponse> {
    Endpoint::post("/auth/login").json(body)
}

/// 注册结果不参与会话，按原样返回
pub fn register(body: &RegisterRequest) -> Endpoint<Value> {
    Endpoint::post("/auth/register").json(body)
}

pub fn users() -> Endpoint<Vec<User>> {
    Endpoint::get("/auth/users")
}

pub fn update_user(id: i64, body: &UserUpdate) -> Endpoint<User> {
    Endpoint::put(format!("/auth/users/{}", id)).json(body)
}

pub fn delete_user(id: i64) -> Endpoint<()> {
    Endpoint::delete(format!("/auth/users/{}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_energy_shared::Role;
    use campus_energy_shared::protocol::HttpMethod;
    use serde_json::json;

    #[test]
    fn register_body_is_camel_case() {
        let ep = register(&RegisterRequest {
            username: "wang".into(),
            password: "Passw0rd!".into(),
            email: "wang@campus.edu".into(),
            real_name: Some("王五".into()),
            phone: None,
            role: Role::User,
        });
        assert_eq!(ep.path, "/auth/register");
        assert_eq!(
            ep.body,
            Some(json!({
                "username": "wang",
                "password": "Passw0rd!",
                "email": "wang@campus.edu",
                "realName": "王五",
                "role": "USER"
            }))
        );
    }

    #[test]
    fn user_management_paths() {
        let ep = update_user(3, &UserUpdate { enabled: Some(false), ..Default::default() });
        assert_eq!(ep.method, HttpMethod::Put);
        assert_eq!(ep.path, "/auth/users/3");
        assert_eq!(ep.body, Some(json!({ "enabled": false })));

        let ep = delete_user(3);
        assert_eq!(ep.method, HttpMethod::Delete);
        assert_eq!(ep.path, "/auth/users/3");
        assert_eq!(users().method, HttpMethod::Get);
    }
}
