use std::env;
use std::time::Duration;

/// Fallback poll interval when `YOULESS_CHECK_INTERVAL` is unset or unparsable.
const DEFAULT_CHECK_INTERVAL_MS: u64 = 30_000;

/// Settings for one YouLess device connection, resolved once at startup.
#[derive(Debug, Clone)]
pub struct YoulessConfig {
    /// Address of the YouLess device. Empty means the connector stays disabled.
    pub ip: String,
    /// Delay between poll cycles.
    pub check_interval: Duration,
}

impl YoulessConfig {
    pub fn new(ip: impl Into<String>, check_interval: Duration) -> Self {
        Self {
            ip: ip.into(),
            check_interval,
        }
    }

    /// Reads the connector configuration from the environment:
    /// `YOULESS_IP` (default empty) and `YOULESS_CHECK_INTERVAL` in
    /// milliseconds (default 30000).
    pub fn from_env() -> Self {
        Self {
            ip: env::var("YOULESS_IP").unwrap_or_default(),
            check_interval: parse_millis_safe(env::var("YOULESS_CHECK_INTERVAL").ok()),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.ip.is_empty()
    }
}

/// Safely parses an interval in milliseconds, falling back to the default
fn parse_millis_safe(val: Option<String>) -> Duration {
    let millis = val
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_CHECK_INTERVAL_MS);
    Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_millis_safe() {
        // Test None input
        assert_eq!(parse_millis_safe(None), Duration::from_millis(30_000));

        // Test empty string
        assert_eq!(
            parse_millis_safe(Some("".to_string())),
            Duration::from_millis(30_000)
        );

        // Test valid values
        assert_eq!(
            parse_millis_safe(Some("5000".to_string())),
            Duration::from_millis(5000)
        );
        assert_eq!(
            parse_millis_safe(Some("0".to_string())),
            Duration::from_millis(0)
        );

        // Test invalid strings (should fall back to the default)
        assert_eq!(
            parse_millis_safe(Some("-100".to_string())),
            Duration::from_millis(30_000)
        );
        assert_eq!(
            parse_millis_safe(Some("fast".to_string())),
            Duration::from_millis(30_000)
        );
        assert_eq!(
            parse_millis_safe(Some("1.5".to_string())),
            Duration::from_millis(30_000)
        );
    }

    #[test]
    fn test_from_env_defaults() {
        env::remove_var("YOULESS_IP");
        env::remove_var("YOULESS_CHECK_INTERVAL");

        let config = YoulessConfig::from_env();
        assert_eq!(config.ip, "");
        assert!(!config.is_configured());
        assert_eq!(config.check_interval, Duration::from_millis(30_000));

        env::set_var("YOULESS_IP", "192.168.1.50");
        env::set_var("YOULESS_CHECK_INTERVAL", "2500");

        let config = YoulessConfig::from_env();
        assert_eq!(config.ip, "192.168.1.50");
        assert!(config.is_configured());
        assert_eq!(config.check_interval, Duration::from_millis(2500));

        env::remove_var("YOULESS_IP");
        env::remove_var("YOULESS_CHECK_INTERVAL");
    }
}
