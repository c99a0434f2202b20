/// Core logging implementation with automatic filtering
///
/// Decides whether a message should be displayed based on its level and
/// tag, then delegates formatting and writing to the format module.
use super::config::{get_logger_config, is_debug_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level requires --debug-<module> flag for that tag
/// 4. Verbose level requires --verbose
/// 5. If enabled_tags is non-empty, tag must be in the set
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug && !is_debug_enabled_for_tag(tag) {
        return false;
    }

    if level == LogLevel::Verbose && config.min_level != LogLevel::Verbose {
        return false;
    }

    if !config.enabled_tags.is_empty() && !config.enabled_tags.contains(&tag.to_debug_key()) {
        return false;
    }

    true
}

/// Internal logging function with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level.as_str(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::{set_logger_config, LoggerConfig};

    #[test]
    fn errors_always_pass_the_filter() {
        let mut config = LoggerConfig::default();
        config.min_level = LogLevel::Warning;
        set_logger_config(config);

        assert!(should_log(&LogTag::System, LogLevel::Error));
        assert!(!should_log(&LogTag::System, LogLevel::Info));

        set_logger_config(LoggerConfig::default());
    }

    #[test]
    fn debug_requires_module_flag() {
        let mut config = LoggerConfig::default();
        config.min_level = LogLevel::Debug;
        config.debug_tags.insert("upload".to_string());
        set_logger_config(config);

        assert!(should_log(&LogTag::Upload, LogLevel::Debug));
        assert!(!should_log(&LogTag::Telegram, LogLevel::Debug));

        set_logger_config(LoggerConfig::default());
    }
}
