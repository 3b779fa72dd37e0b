//! 时间类型与格式化
//!
//! - `Timestamp`: 可序列化的毫秒时间戳，用于节流/防抖等计时
//! - 日期格式化：渲染后端返回的 `LocalDateTime` 字符串以及相对时间

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use std::time::Duration;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =========================================================
// Timestamp - 可传输的时间戳类型
// =========================================================

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn as_secs(&self) -> i64 {
        self.0 / 1000
    }

    /// 当前时间
    pub fn now() -> Self {
        Self(Local::now().timestamp_millis())
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.as_millis() as i64)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    /// 两个时间戳之间的差值，负数截断为零
    fn sub(self, rhs: Timestamp) -> Self::Output {
        let diff_ms = (self.0 - rhs.0).max(0);
        Duration::from_millis(diff_ms as u64)
    }
}

// =========================================================
// 解析
// =========================================================

/// 解析后端返回的时间字符串
///
/// 支持 `2024-05-01T08:30:00`（含可选小数秒）、`2024-05-01 08:30:00`、
/// RFC 3339（带时区，转换为本地时间）以及纯日期 `2024-05-01`。
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 把时间戳转换为本地时间
pub fn local_from_timestamp(ts: Timestamp) -> Option<NaiveDateTime> {
    Local
        .timestamp_millis_opt(ts.as_millis())
        .single()
        .map(|dt| dt.naive_local())
}

/// 请求参数使用的 ISO 格式（后端 `DateTimeFormat.ISO.DATE_TIME`）
pub fn to_iso(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

// =========================================================
// 格式化
// =========================================================

pub fn format_date(dt: &NaiveDateTime) -> String {
    dt.format(DATE_FORMAT).to_string()
}

pub fn format_time(dt: &NaiveDateTime) -> String {
    dt.format(TIME_FORMAT).to_string()
}

pub fn format_date_time(dt: &NaiveDateTime) -> String {
    dt.format(DATE_TIME_FORMAT).to_string()
}

/// 格式化后端时间字符串，无法解析时原样返回
pub fn display_date_time(raw: &str) -> String {
    parse_date_time(raw)
        .map(|dt| format_date_time(&dt))
        .unwrap_or_else(|| raw.to_string())
}

/// 相对当前时间的描述，如 `3 分钟前`
pub fn from_now(dt: &NaiveDateTime) -> String {
    relative_to(dt, &Local::now().naive_local())
}

/// 相对时间描述（中文）
///
/// 分段阈值：45 秒、90 秒、45 分钟、90 分钟、22 小时、36 小时、
/// 26 天、46 天、320 天、548 天。未来时间使用 `内` 后缀。
pub fn relative_to(dt: &NaiveDateTime, now: &NaiveDateTime) -> String {
    let diff = *now - *dt;
    let future = diff < ChronoDuration::zero();
    let secs = diff.num_seconds().abs();

    let minutes = round_div(secs, 60);
    let hours = round_div(secs, 3600);
    let days = round_div(secs, 86_400);

    let phrase = if secs < 45 {
        "几秒".to_string()
    } else if secs < 90 {
        "1 分钟".to_string()
    } else if minutes < 45 {
        format!("{} 分钟", minutes)
    } else if minutes < 90 {
        "1 小时".to_string()
    } else if hours < 22 {
        format!("{} 小时", hours)
    } else if hours < 36 {
        "1 天".to_string()
    } else if days < 26 {
        format!("{} 天", days)
    } else if days < 46 {
        "1 个月".to_string()
    } else if days < 320 {
        format!("{} 个月", round_div(days, 30).max(2))
    } else if days < 548 {
        "1 年".to_string()
    } else {
        format!("{} 年", round_div(days, 365).max(2))
    };

    if future {
        format!("{}内", phrase)
    } else {
        format!("{}前", phrase)
    }
}

fn round_div(value: i64, unit: i64) -> i64 {
    (value + unit / 2) / unit
}

// =========================================================
// 日期区间
// =========================================================

pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

pub fn days_ago(days: i64) -> String {
    days_before(Local::now().date_naive(), days)
}

/// 超出可表示范围时退回到 `date` 本身
fn days_before(date: NaiveDate, days: i64) -> String {
    ChronoDuration::try_days(days)
        .and_then(|delta| date.checked_sub_signed(delta))
        .unwrap_or(date)
        .format(DATE_FORMAT)
        .to_string()
}

/// 查询用的日期区间
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    pub const DEFAULT_DAYS: i64 = 7;

    /// 截至今天的最近 `days` 天
    pub fn last_days(days: i64) -> Self {
        Self::ending_on(Local::now().date_naive(), days)
    }

    pub fn ending_on(end: NaiveDate, days: i64) -> Self {
        Self {
            start_date: days_before(end, days),
            end_date: end.format(DATE_FORMAT).to_string(),
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::last_days(Self::DEFAULT_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT).unwrap()
    }

    #[test]
    fn parses_backend_formats() {
        let expected = at("2024-05-01 08:30:00");
        assert_eq!(parse_date_time("2024-05-01T08:30:00"), Some(expected));
        assert_eq!(parse_date_time("2024-05-01T08:30:00.123"), Some(expected + ChronoDuration::milliseconds(123)));
        assert_eq!(parse_date_time("2024-05-01 08:30:00"), Some(expected));
        assert_eq!(parse_date_time("2024-05-01"), Some(at("2024-05-01 00:00:00")));
        assert_eq!(parse_date_time("yesterday"), None);
    }

    #[test]
    fn formats() {
        let dt = at("2024-05-01 08:30:05");
        assert_eq!(format_date(&dt), "2024-05-01");
        assert_eq!(format_time(&dt), "08:30:05");
        assert_eq!(format_date_time(&dt), "2024-05-01 08:30:05");
        assert_eq!(display_date_time("2024-05-01T08:30:05"), "2024-05-01 08:30:05");
        assert_eq!(display_date_time("n/a"), "n/a");
        assert_eq!(to_iso(&dt), "2024-05-01T08:30:05");
    }

    #[test]
    fn relative_phrases() {
        let now = at("2024-05-10 12:00:00");
        assert_eq!(relative_to(&at("2024-05-10 11:59:50"), &now), "几秒前");
        assert_eq!(relative_to(&at("2024-05-10 11:59:00"), &now), "1 分钟前");
        assert_eq!(relative_to(&at("2024-05-10 11:50:00"), &now), "10 分钟前");
        assert_eq!(relative_to(&at("2024-05-10 09:00:00"), &now), "3 小时前");
        assert_eq!(relative_to(&at("2024-05-09 12:00:00"), &now), "1 天前");
        assert_eq!(relative_to(&at("2024-05-05 12:00:00"), &now), "5 天前");
        assert_eq!(relative_to(&at("2024-03-10 12:00:00"), &now), "2 个月前");
        assert_eq!(relative_to(&at("2021-05-10 12:00:00"), &now), "3 年前");
        assert_eq!(relative_to(&at("2024-05-10 12:10:00"), &now), "10 分钟内");
    }

    #[test]
    fn date_range() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let range = DateRange::ending_on(end, 7);
        assert_eq!(range.start_date, "2024-02-24");
        assert_eq!(range.end_date, "2024-03-02");
    }

    #[test]
    fn out_of_range_days_fall_back_to_end_date() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(DateRange::ending_on(end, i64::MAX).start_date, "2024-03-02");
        assert_eq!(DateRange::ending_on(end, 100_000_000).start_date, "2024-03-02");
        assert_eq!(days_ago(i64::MIN), today());
    }

    #[test]
    fn timestamp_arithmetic() {
        let a = Timestamp::new(1_000);
        let b = a + Duration::from_millis(500);
        assert_eq!(b.as_millis(), 1_500);
        assert_eq!(b - a, Duration::from_millis(500));
        assert_eq!(a - b, Duration::ZERO);
    }
}
