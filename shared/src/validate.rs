//! 表单字段校验
//!
//! 纯函数，无 I/O，无共享状态。

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|_| unreachable!()));

/// 中国大陆手机号
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").unwrap_or_else(|_| unreachable!()));

static SERIAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9_]+$").unwrap_or_else(|_| unreachable!()));

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_SERIAL_LEN: usize = 3;
pub const MAX_POWER: f64 = 100_000.0;
pub const MAX_VOLTAGE: f64 = 1_000.0;

pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn validate_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// 密码强度评估结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStrength {
    /// 0..=5，每满足一项检查加一
    pub strength: u8,
    /// `strength >= 3`
    pub is_valid: bool,
    /// 未满足项的提示
    pub tips: Vec<&'static str>,
}

/// 评估密码强度
///
/// 五项独立检查：长度 ≥ 8、小写字母、大写字母、数字、特殊字符。
pub fn validate_password(password: &str) -> PasswordStrength {
    let checks = [
        (password.chars().count() >= MIN_PASSWORD_LEN, "密码长度至少8位"),
        (password.chars().any(|c| c.is_ascii_lowercase()), "包含小写字母"),
        (password.chars().any(|c| c.is_ascii_uppercase()), "包含大写字母"),
        (password.chars().any(|c| c.is_ascii_digit()), "包含数字"),
        (password.chars().any(|c| SPECIAL_CHARS.contains(c)), "包含特殊字符"),
    ];

    let strength = checks.iter().filter(|(ok, _)| *ok).count() as u8;
    let tips = checks
        .iter()
        .filter(|(ok, _)| !*ok)
        .map(|(_, tip)| *tip)
        .collect();

    PasswordStrength {
        strength,
        is_valid: strength >= 3,
        tips,
    }
}

/// 设备序列号：大写字母、数字、下划线，至少 3 位
pub fn validate_serial_number(sn: &str) -> bool {
    SERIAL_REGEX.is_match(sn) && sn.len() >= MIN_SERIAL_LEN
}

pub fn validate_power(power: f64) -> bool {
    power.is_finite() && (0.0..=MAX_POWER).contains(&power)
}

pub fn validate_voltage(voltage: f64) -> bool {
    voltage.is_finite() && (0.0..=MAX_VOLTAGE).contains(&voltage)
}

/// 解析表单中的数值输入，无法解析时返回 `None`
pub fn parse_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
