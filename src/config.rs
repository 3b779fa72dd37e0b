use serde::{Deserialize, Serialize};
use std::time::Duration;

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，环境变量或配置文件中未定义时使用
pub const DEFAULT_BASE_URL: &str = "/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_BASE_URL: &str = "CAMPUS_ENERGY_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "CAMPUS_ENERGY_TIMEOUT_SECS";

/// 适配器配置：接口前缀与统一超时
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 去掉末尾 `/` 的接口前缀
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// 从进程环境变量读取
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取，读不到或无法解析就用默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup(ENV_BASE_URL)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout_secs: lookup(ENV_TIMEOUT_SECS)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base(), "/api");
        assert_eq!(cfg.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn lookup_overrides_and_fallbacks() {
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://localhost:8080/api/"),
            (ENV_TIMEOUT_SECS, "not-a-number"),
        ]
        .into_iter()
        .collect();
        let cfg = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.base(), "http://localhost:8080/api");
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn partial_json() {
        let cfg = ClientConfig::from_json(r#"{ "timeoutSecs": 10 }"#).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
    }
}
