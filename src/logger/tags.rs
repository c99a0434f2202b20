/// Log tags identify which subsystem produced a message
///
/// Each tag maps to a `--debug-<module>` command-line flag so diagnostic
/// output can be enabled per subsystem.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Webserver,
    Telegram,
    Stories,
    Upload,
    Config,
    Test,
    Other(String),
}

impl LogTag {
    /// Key used by `--debug-<key>` flags and the enabled-tags filter
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Webserver => "webserver".to_string(),
            LogTag::Telegram => "telegram".to_string(),
            LogTag::Stories => "stories".to_string(),
            LogTag::Upload => "upload".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Test => "test".to_string(),
            LogTag::Other(s) => s.to_lowercase(),
        }
    }

    /// Uppercase label shown in console and file output
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Webserver => "WEBSERVER".to_string(),
            LogTag::Telegram => "TELEGRAM".to_string(),
            LogTag::Stories => "STORIES".to_string(),
            LogTag::Upload => "UPLOAD".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Test => "TEST".to_string(),
            LogTag::Other(s) => s.to_uppercase(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_keys_match_cli_flags() {
        assert_eq!(LogTag::Webserver.to_debug_key(), "webserver");
        assert_eq!(LogTag::Other("Custom".to_string()).to_debug_key(), "custom");
    }
}
