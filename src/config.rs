//! Environment configuration.
//!
//! Read once at startup and passed by reference to whatever needs it.

use std::env;
use std::time::Duration;

pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_ESC_TIMEOUT_MS: u64 = 25;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub fps_limit: u32,
    pub escape_timeout_ms: u64,
    pub log_path: Option<String>,
    pub log_filter: String,
    pub debug: bool,
    pub term: Option<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            fps_limit: DEFAULT_FPS,
            escape_timeout_ms: DEFAULT_ESC_TIMEOUT_MS,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            debug: false,
            term: None,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            fps_limit: env_parse("SLATE_TUI_FPS")
                .filter(|fps| *fps > 0)
                .unwrap_or(defaults.fps_limit),
            escape_timeout_ms: env_parse("SLATE_TUI_ESC_TIMEOUT_MS")
                .unwrap_or(defaults.escape_timeout_ms),
            log_path: env_string_opt("SLATE_TUI_LOG"),
            log_filter: env_string_opt("SLATE_TUI_LOG_FILTER").unwrap_or(defaults.log_filter),
            debug: env_flag("SLATE_TUI_DEBUG"),
            term: env_string_opt("TERM"),
        }
    }

    /// Frame budget for `fps_limit`, or `None` when pacing is off.
    pub fn frame_time(&self) -> Option<Duration> {
        (self.fps_limit > 0).then(|| Duration::from_secs(1) / self.fps_limit)
    }

    pub fn escape_timeout(&self) -> Duration {
        Duration::from_millis(self.escape_timeout_ms)
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string_opt(key).and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::{EnvConfig, DEFAULT_ESC_TIMEOUT_MS, DEFAULT_FPS};
    use std::env;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_apply_when_unset() {
        let _lock = env_lock();
        let _g1 = set_env_guard("SLATE_TUI_FPS", None);
        let _g2 = set_env_guard("SLATE_TUI_ESC_TIMEOUT_MS", None);
        let _g3 = set_env_guard("SLATE_TUI_LOG", None);
        let _g4 = set_env_guard("SLATE_TUI_LOG_FILTER", None);
        let _g5 = set_env_guard("SLATE_TUI_DEBUG", None);

        let config = EnvConfig::from_env();
        assert_eq!(config.fps_limit, DEFAULT_FPS);
        assert_eq!(config.escape_timeout_ms, DEFAULT_ESC_TIMEOUT_MS);
        assert!(config.log_path.is_none());
        assert_eq!(config.log_filter, "info");
        assert!(!config.debug);
    }

    #[test]
    fn env_values_override_defaults() {
        let _lock = env_lock();
        let _g1 = set_env_guard("SLATE_TUI_FPS", Some("60"));
        let _g2 = set_env_guard("SLATE_TUI_ESC_TIMEOUT_MS", Some("5"));
        let _g3 = set_env_guard("SLATE_TUI_LOG", Some("/tmp/slate.log"));
        let _g4 = set_env_guard("SLATE_TUI_LOG_FILTER", Some("slate_tui=trace"));
        let _g5 = set_env_guard("SLATE_TUI_DEBUG", Some("1"));
        let _g6 = set_env_guard("TERM", Some("linux"));

        let config = EnvConfig::from_env();
        assert_eq!(config.fps_limit, 60);
        assert_eq!(config.escape_timeout(), Duration::from_millis(5));
        assert_eq!(config.log_path.as_deref(), Some("/tmp/slate.log"));
        assert_eq!(config.log_filter, "slate_tui=trace");
        assert!(config.debug);
        assert_eq!(config.term.as_deref(), Some("linux"));
    }

    #[test]
    fn zero_or_garbage_fps_falls_back() {
        let _lock = env_lock();
        let _g1 = set_env_guard("SLATE_TUI_FPS", Some("0"));
        assert_eq!(EnvConfig::from_env().fps_limit, DEFAULT_FPS);

        let _g2 = set_env_guard("SLATE_TUI_FPS", Some("fast"));
        assert_eq!(EnvConfig::from_env().fps_limit, DEFAULT_FPS);
    }

    #[test]
    fn frame_time_divides_one_second() {
        let config = EnvConfig {
            fps_limit: 20,
            ..EnvConfig::default()
        };
        assert_eq!(config.frame_time(), Some(Duration::from_millis(50)));
        let unlimited = EnvConfig {
            fps_limit: 0,
            ..EnvConfig::default()
        };
        assert_eq!(unlimited.frame_time(), None);
    }
}
