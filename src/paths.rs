//! Centralized path resolution for StoryGate
//!
//! All file and directory paths are resolved through this module so the
//! service behaves the same regardless of the working directory it was
//! launched from.
//!
//! ## Directory Structure
//!
//! ```text
//! ~/StoryGate/
//! ├── data/
//! │ ├── config.toml
//! │ └── telegram.session
//! └── logs/
//!   └── storygate_*.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

/// Lazy-initialized base directory (thread-safe)
static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

/// Resolves the base directory for all StoryGate data
///
/// Uses platform-specific application data locations:
/// - macOS: ~/Library/Application Support/StoryGate
/// - Windows: %LOCALAPPDATA%\StoryGate
/// - Linux: $XDG_DATA_HOME/StoryGate (fallback ~/.local/share/StoryGate)
fn resolve_base_directory() -> PathBuf {
    const APP_DIR: &str = "StoryGate";

    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    // Last resort: relative to the current directory
    PathBuf::from(".").join(APP_DIR)
}

/// Base directory for all StoryGate files
pub fn get_base_directory() -> PathBuf {
    BASE_DIRECTORY.clone()
}

/// Directory holding config and session files
pub fn get_data_directory() -> PathBuf {
    get_base_directory().join("data")
}

/// Directory holding log files
pub fn get_logs_directory() -> PathBuf {
    get_base_directory().join("logs")
}

/// Path of the TOML configuration file
pub fn get_config_path() -> PathBuf {
    get_data_directory().join("config.toml")
}

/// Path of the persisted Telegram session
pub fn get_session_path() -> PathBuf {
    get_data_directory().join("telegram.session")
}

/// Create every directory the service needs at startup
///
/// Must run before logger initialization (the logger writes into the
/// logs directory).
pub fn ensure_all_directories() -> Result<(), String> {
    for dir in [get_data_directory(), get_logs_directory()] {
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_under_data_directory() {
        let config = get_config_path();
        assert!(config.starts_with(get_data_directory()));
        assert_eq!(config.file_name().unwrap(), "config.toml");
    }

    #[test]
    fn logs_and_data_share_the_base_directory() {
        assert!(get_data_directory().starts_with(get_base_directory()));
        assert!(get_logs_directory().starts_with(get_base_directory()));
    }
}
