/// Centralized argument handling for StoryGate
///
/// Consolidates command-line argument parsing and debug flag checking so
/// every module reads flags the same way.
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for all modules
/// - Unified argument parsing utilities
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
/// Returns a vector clone to avoid holding the mutex lock
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => {
            // Fallback to env::args if mutex is poisoned
            env::args().collect()
        }
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// =============================================================================

/// Webserver debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// Telegram client debug mode
pub fn is_debug_telegram_enabled() -> bool {
    has_arg("--debug-telegram")
}

/// Story lookup debug mode
pub fn is_debug_stories_enabled() -> bool {
    has_arg("--debug-stories")
}

/// Upload client debug mode
pub fn is_debug_upload_enabled() -> bool {
    has_arg("--debug-upload")
}

/// Config layer debug mode
pub fn is_debug_config_enabled() -> bool {
    has_arg("--debug-config")
}

/// System operations debug mode
pub fn is_debug_system_enabled() -> bool {
    has_arg("--debug-system")
}

/// Checks if any debug mode is enabled
pub fn is_any_debug_enabled() -> bool {
    is_debug_webserver_enabled()
        || is_debug_telegram_enabled()
        || is_debug_stories_enabled()
        || is_debug_upload_enabled()
        || is_debug_config_enabled()
        || is_debug_system_enabled()
}

/// Lists the enabled debug modes (used by startup banner)
pub fn get_enabled_debug_modes() -> Vec<&'static str> {
    let mut modes = Vec::new();
    if is_debug_webserver_enabled() {
        modes.push("webserver");
    }
    if is_debug_telegram_enabled() {
        modes.push("telegram");
    }
    if is_debug_stories_enabled() {
        modes.push("stories");
    }
    if is_debug_upload_enabled() {
        modes.push("upload");
    }
    if is_debug_config_enabled() {
        modes.push("config");
    }
    if is_debug_system_enabled() {
        modes.push("system");
    }
    modes
}

/// Print enabled debug modes at startup, if any
pub fn print_debug_info() {
    let modes = get_enabled_debug_modes();
    if !modes.is_empty() {
        crate::logger::info(
            crate::logger::LogTag::System,
            &format!("Debug modes enabled: {}", modes.join(", ")),
        );
    }
}

pub fn print_help() {
    println!("StoryGate - Telegram story download gateway");
    println!();
    println!("USAGE:");
    println!("    storygate [FLAGS]");
    println!();
    println!("CORE FLAGS:");
    println!("    --help, -h                Show this help message");
    println!("    --version, -V             Show version");
    println!("    --port <PORT>             Override the webserver port");
    println!();
    println!("DEBUG FLAGS:");
    println!("    --debug-webserver         Webserver debug mode");
    println!("    --debug-telegram          Telegram client debug mode");
    println!("    --debug-stories           Story lookup debug mode");
    println!("    --debug-upload            Upload client debug mode");
    println!("    --debug-config            Config layer debug mode");
    println!("    --debug-system            System operations debug mode");
    println!("    --verbose                 Show verbose trace output");
    println!("    --quiet, -q               Only show warnings and errors");
    println!();
    println!("EXAMPLES:");
    println!("    storygate                                 # Start the gateway");
    println!("    storygate --port 9000                     # Start on a custom port");
    println!("    storygate --debug-telegram --debug-upload # Trace upstream calls");
}

// =============================================================================
// COMMON ARGUMENT PATTERNS
// =============================================================================

/// Common argument parsing patterns
pub mod patterns {
    use super::*;

    /// Checks for help flags
    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }

    /// Checks for version flags
    pub fn is_version_requested() -> bool {
        has_arg("--version") || has_arg("-V")
    }

    /// Checks for quiet/silent mode
    pub fn is_quiet_mode() -> bool {
        has_arg("--quiet") || has_arg("-q")
    }

    /// Checks for verbose mode
    pub fn is_verbose_mode() -> bool {
        has_arg("--verbose")
    }

    /// Gets the webserver port override
    pub fn get_port_override() -> Option<u16> {
        get_arg_value("--port").and_then(|s| s.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_lookup_uses_injected_args() {
        set_cmd_args(vec![
            "storygate".to_string(),
            "--debug-telegram".to_string(),
            "--port".to_string(),
            "9000".to_string(),
        ]);

        assert!(is_debug_telegram_enabled());
        assert!(!is_debug_webserver_enabled());
        assert_eq!(get_arg_value("--port").as_deref(), Some("9000"));
        assert_eq!(patterns::get_port_override(), Some(9000));
        assert_eq!(get_enabled_debug_modes(), vec!["telegram"]);

        // Restore real args for other tests
        set_cmd_args(env::args().collect());
    }

    #[test]
    fn flag_value_missing_returns_none() {
        set_cmd_args(vec!["storygate".to_string(), "--port".to_string()]);
        assert_eq!(get_arg_value("--port"), None);
        set_cmd_args(env::args().collect());
    }
}
