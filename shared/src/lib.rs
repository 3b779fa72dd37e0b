use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod date;
pub mod protocol;
pub mod validate;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 持久化 Token 的存储键
pub const STORAGE_TOKEN_KEY: &str = "token";
/// 持久化用户资料 (JSON) 的存储键
pub const STORAGE_PROFILE_KEY: &str = "userInfo";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// 响应信封中表示成功的业务码
pub const SUCCESS_CODE: i32 = 200;
/// 响应信封中表示登录失效的业务码
pub const UNAUTHORIZED_CODE: i32 = 401;
pub const APP_TITLE: &str = "智慧校园能耗监测平台";

/// 额外字段：后端新增的字段原样保留，客户端不做校验
pub type Extra = Map<String, Value>;

// =========================================================
// 响应信封 (Envelope)
// =========================================================

/// 后端统一响应结构 `{ code, message, data }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Spring Data 分页结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

/// 分页查询参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
}

impl PageQuery {
    pub const DEFAULT_SIZE: u32 = 20;

    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}

// =========================================================
// 角色与状态枚举
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "管理员",
            Role::User => "普通用户",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceStatus {
    #[default]
    Online,
    Offline,
    Maintenance,
    Decommissioned,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "ONLINE",
            DeviceStatus::Offline => "OFFLINE",
            DeviceStatus::Maintenance => "MAINTENANCE",
            DeviceStatus::Decommissioned => "DECOMMISSIONED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "在线",
            DeviceStatus::Offline => "离线",
            DeviceStatus::Maintenance => "维护中",
            DeviceStatus::Decommissioned => "已停用",
        }
    }
}

// =========================================================
// 认证模型 (Auth)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// 登录成功后 `data` 字段的内容
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub real_name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub role_label: Option<String>,
}

/// 会话中保存的用户资料，存储键为 `userInfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub real_name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub role_label: Option<String>,
}

impl From<&LoginResponse> for UserProfile {
    fn from(res: &LoginResponse) -> Self {
        Self {
            user_id: res.user_id,
            username: res.username.clone(),
            real_name: res.real_name.clone(),
            role: res.role,
            role_label: res.role_label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location_code: Option<String>,
    #[serde(default)]
    pub floor_count: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub device_count: Option<i32>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 计量设备（电表）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub status: Option<DeviceStatus>,
    #[serde(default)]
    pub rated_power: Option<f64>,
    #[serde(default)]
    pub building_id: Option<i64>,
    #[serde(default)]
    pub building_name: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRequest {
    pub name: String,
    pub serial_number: String,
    pub building_id: i64,
    pub room_number: String,
    pub rated_power: f64,
    pub status: DeviceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyReading {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub voltage: Option<f64>,
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub power: Option<f64>,
    #[serde(default)]
    pub total_energy: Option<f64>,
    #[serde(default)]
    pub collect_time: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub alert_value: Option<f64>,
    #[serde(default)]
    pub threshold_value: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_resolved: Option<bool>,
    #[serde(default)]
    pub trigger_time: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `/statistics/overview` 返回的概览数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverviewStatistics {
    pub building_count: i64,
    pub device_count: i64,
    pub online_device_count: i64,
    pub offline_device_count: i64,
    pub today_alert_count: i64,
    pub unresolved_alert_count: i64,
    pub today_total_energy: Option<f64>,
    pub month_total_energy: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}
