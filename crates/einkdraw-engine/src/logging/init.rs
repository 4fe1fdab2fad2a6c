use std::sync::Once;

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "EINKDRAW_LOG";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "einkdraw_core::throttle=trace,wgpu=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Millisecond timestamps, handy when lining up logs with pointer
    /// timestamps.
    pub timestamp_millis: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            timestamp_millis: true,
        }
    }
}

/// The filter to install: explicit, then `EINKDRAW_LOG`, then `RUST_LOG`.
/// `None` means the built-in default.
fn resolve_filter<F>(explicit: Option<String>, env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let set = |f: &String| !f.trim().is_empty();
    explicit
        .filter(set)
        .or_else(|| env(LOG_ENV).filter(set))
        .or_else(|| env("RUST_LOG").filter(set))
}

static INIT: Once = Once::new();

/// Installs `env_logger` behind `log`, at most once per process.
///
/// Without a filter, logs `info` and holds wgpu internals at `warn`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(config.env_filter, |k| std::env::var(k).ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);
        if config.timestamp_millis {
            builder.format_timestamp_millis();
        }

        // Another logger may already be installed (tests, embedding hosts).
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_precedence() {
        let env = |k: &str| match k {
            LOG_ENV => Some("debug".to_string()),
            "RUST_LOG" => Some("trace".to_string()),
            _ => None,
        };
        assert_eq!(resolve_filter(Some("warn".into()), env).as_deref(), Some("warn"));
        assert_eq!(resolve_filter(None, env).as_deref(), Some("debug"));

        let rust_only = |k: &str| (k == "RUST_LOG").then(|| "trace".to_string());
        assert_eq!(resolve_filter(None, rust_only).as_deref(), Some("trace"));
        assert_eq!(resolve_filter(Some("  ".into()), |_| None), None);
    }

    #[test]
    fn blank_filter_falls_through() {
        let env = |k: &str| match k {
            LOG_ENV => Some("debug".to_string()),
            "RUST_LOG" => Some("trace".to_string()),
            _ => None,
        };
        assert_eq!(resolve_filter(Some(" ".into()), env).as_deref(), Some("debug"));

        let blank_own = |k: &str| match k {
            LOG_ENV => Some(String::new()),
            "RUST_LOG" => Some("trace".to_string()),
            _ => None,
        };
        assert_eq!(resolve_filter(Some(String::new()), blank_own).as_deref(), Some("trace"));
    }

    #[test]
    fn init_is_idempotent() {
        let config = LoggingConfig {
            env_filter: Some("warn".into()),
            ..Default::default()
        };
        init_logging(config.clone());
        init_logging(config);
        log::warn!("still alive after double init");
    }
}
