/// Shared application state for the webserver
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::WebserverConfig;

/// Shared application state passed to all route handlers
pub struct AppState {
    /// Webserver configuration
    pub config: Arc<WebserverConfig>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,

    /// Requests served since startup
    pub requests_served: AtomicU64,
}

impl AppState {
    pub fn new(config: WebserverConfig) -> Self {
        Self {
            config: Arc::new(config),
            startup_time: chrono::Utc::now(),
            requests_served: AtomicU64::new(0),
        }
    }

    /// Count a handled request and return the new total
    pub fn count_request(&self) -> u64 {
        self.requests_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    /// Server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_counter_increments() {
        let state = AppState::new(WebserverConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        });
        assert_eq!(state.requests_served(), 0);
        assert_eq!(state.count_request(), 1);
        assert_eq!(state.count_request(), 2);
        assert_eq!(state.requests_served(), 2);
    }
}
