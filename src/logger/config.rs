/// Logger configuration derived from command-line arguments
///
/// Scans CMD_ARGS once at init and stores the result in a global cell so
/// per-message filtering is cheap.
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level printed to console (Error always passes)
    pub min_level: LogLevel,
    /// Tags with `--debug-<module>` enabled
    pub debug_tags: HashSet<String>,
    /// When non-empty, only these tags are logged
    pub enabled_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Build logger configuration from the current command-line arguments
pub fn init_from_args() {
    let mut config = LoggerConfig::default();

    if arguments::patterns::is_quiet_mode() {
        config.min_level = LogLevel::Warning;
    }
    if arguments::patterns::is_verbose_mode() {
        config.min_level = LogLevel::Verbose;
    }

    for arg in arguments::get_cmd_args() {
        if let Some(module) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(module.to_string());
        }
    }

    // Debug flags imply at least Debug level for the flagged modules
    if !config.debug_tags.is_empty() && config.min_level < LogLevel::Debug {
        config.min_level = LogLevel::Debug;
    }

    set_logger_config(config);
}

/// Snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_default()
}

/// Replace the logger configuration (tests and init)
pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        *current = config;
    }
}

/// True when `--debug-<module>` was passed for this tag
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    get_logger_config().debug_tags.contains(&tag.to_debug_key())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_enables_tag() {
        let mut config = LoggerConfig::default();
        config.debug_tags.insert("telegram".to_string());
        set_logger_config(config);

        assert!(is_debug_enabled_for_tag(&LogTag::Telegram));
        assert!(!is_debug_enabled_for_tag(&LogTag::Upload));

        set_logger_config(LoggerConfig::default());
    }
}
