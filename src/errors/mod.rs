/// Structured error handling for StoryGate
///
/// One top-level error type wrapping per-domain enums; the webserver maps
/// each variant to an HTTP status via `http_status()`.
use axum::http::StatusCode;

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone)]
pub enum StoryGateError {
    // Telegram client and story lookup errors
    Telegram(TelegramError),

    // Network connectivity errors
    Network(NetworkError),

    // tmpfiles.org upload errors
    Upload(UploadError),

    // Configuration errors
    Configuration(ConfigurationError),

    // Data parsing & validation errors
    Data(DataError),
}

impl std::fmt::Display for StoryGateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryGateError::Telegram(e) => write!(f, "Telegram Error: {}", e),
            StoryGateError::Network(e) => write!(f, "Network Error: {}", e),
            StoryGateError::Upload(e) => write!(f, "Upload Error: {}", e),
            StoryGateError::Configuration(e) => write!(f, "Configuration Error: {}", e),
            StoryGateError::Data(e) => write!(f, "Data Error: {}", e),
        }
    }
}

impl std::error::Error for StoryGateError {}

// =============================================================================
// TELEGRAM ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum TelegramError {
    NotConnected {
        reason: String,
    },
    NotAuthorized,
    PeerNotFound {
        username: String,
    },
    StoryNotFound {
        username: String,
        story_id: i32,
    },
    StoryHasNoMedia {
        story_id: i32,
    },
    DownloadFailed {
        story_id: i32,
        reason: String,
    },
    Rpc {
        method: String,
        message: String,
    },
}

impl std::fmt::Display for TelegramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelegramError::NotConnected { reason } => {
                write!(f, "Client not connected: {}", reason)
            }
            TelegramError::NotAuthorized => {
                write!(f, "Session is not authorized; provide a valid session string")
            }
            TelegramError::PeerNotFound { username } => {
                write!(f, "User/channel not found: {}", username)
            }
            TelegramError::StoryNotFound { username, story_id } => {
                write!(f, "Story {} not found for {}", story_id, username)
            }
            TelegramError::StoryHasNoMedia { story_id } => {
                write!(f, "Story {} has no media", story_id)
            }
            TelegramError::DownloadFailed { story_id, reason } => {
                write!(f, "Failed to download media for story {}: {}", story_id, reason)
            }
            TelegramError::Rpc { method, message } => {
                write!(f, "{} failed: {}", method, message)
            }
        }
    }
}

// =============================================================================
// NETWORK ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum NetworkError {
    HttpStatusError {
        endpoint: String,
        status: u16,
        body: Option<String>,
    },
    Generic {
        message: String,
    },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::HttpStatusError {
                endpoint,
                status,
                body,
            } => {
                write!(
                    f,
                    "HTTP {} from {}: {}",
                    status,
                    endpoint,
                    body.as_deref().unwrap_or("No body")
                )
            }
            NetworkError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// UPLOAD ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum UploadError {
    HostRejected {
        status: u16,
        body: String,
    },
    MalformedResponse {
        response_body: String,
    },
    Disabled,
    Generic {
        message: String,
    },
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::HostRejected { status, body } => {
                write!(f, "File host rejected upload (HTTP {}): {}", status, body)
            }
            UploadError::MalformedResponse { response_body } => {
                write!(f, "Unexpected file host response: {}", response_body)
            }
            UploadError::Disabled => write!(f, "Upload client disabled via configuration"),
            UploadError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// CONFIGURATION ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum ConfigurationError {
    MissingConfig { field: String },
    InvalidConfig { field: String, reason: String },
    Generic { message: String },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::MissingConfig { field } => {
                write!(f, "Missing config field '{}'", field)
            }
            ConfigurationError::InvalidConfig { field, reason } => {
                write!(f, "Invalid config field '{}': {}", field, reason)
            }
            ConfigurationError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// DATA ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum DataError {
    InvalidStoryUrl {
        url: String,
    },
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },
    ParseError {
        data_type: String,
        error: String,
    },
    Generic {
        message: String,
    },
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::InvalidStoryUrl { url } => {
                write!(
                    f,
                    "Invalid URL format '{}'. Use: https://t.me/username/s/123456",
                    url
                )
            }
            DataError::InvalidParameter {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{}'='{}': {}", field, value, reason)
            }
            DataError::ParseError { data_type, error } => {
                write!(f, "Failed to parse {}: {}", data_type, error)
            }
            DataError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl From<reqwest::Error> for StoryGateError {
    fn from(err: reqwest::Error) -> Self {
        StoryGateError::Network(NetworkError::Generic {
            message: format!("HTTP request failed: {}", err),
        })
    }
}

impl From<serde_json::Error> for StoryGateError {
    fn from(err: serde_json::Error) -> Self {
        StoryGateError::Data(DataError::ParseError {
            data_type: "JSON".to_string(),
            error: err.to_string(),
        })
    }
}

impl From<String> for StoryGateError {
    fn from(err: String) -> Self {
        StoryGateError::Network(NetworkError::Generic { message: err })
    }
}

// =============================================================================
// BUILDERS AND HTTP MAPPING
// =============================================================================

impl StoryGateError {
    pub fn peer_not_found(username: impl Into<String>) -> Self {
        StoryGateError::Telegram(TelegramError::PeerNotFound {
            username: username.into(),
        })
    }

    pub fn story_not_found(username: impl Into<String>, story_id: i32) -> Self {
        StoryGateError::Telegram(TelegramError::StoryNotFound {
            username: username.into(),
            story_id,
        })
    }

    pub fn rpc_error(method: impl Into<String>, message: impl Into<String>) -> Self {
        StoryGateError::Telegram(TelegramError::Rpc {
            method: method.into(),
            message: message.into(),
        })
    }

    pub fn invalid_story_url(url: impl Into<String>) -> Self {
        StoryGateError::Data(DataError::InvalidStoryUrl { url: url.into() })
    }

    pub fn invalid_parameter(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        StoryGateError::Data(DataError::InvalidParameter {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn upload_error(message: impl Into<String>) -> Self {
        StoryGateError::Upload(UploadError::Generic {
            message: message.into(),
        })
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        StoryGateError::Configuration(ConfigurationError::Generic {
            message: message.into(),
        })
    }

    /// Short machine-readable code used in error envelopes
    pub fn code(&self) -> &'static str {
        match self {
            StoryGateError::Telegram(TelegramError::PeerNotFound { .. }) => "PEER_NOT_FOUND",
            StoryGateError::Telegram(TelegramError::StoryNotFound { .. }) => "STORY_NOT_FOUND",
            StoryGateError::Telegram(TelegramError::StoryHasNoMedia { .. }) => "NO_MEDIA",
            StoryGateError::Telegram(TelegramError::NotAuthorized) => "NOT_AUTHORIZED",
            StoryGateError::Telegram(TelegramError::NotConnected { .. }) => "NOT_CONNECTED",
            StoryGateError::Telegram(_) => "TELEGRAM_ERROR",
            StoryGateError::Network(_) => "NETWORK_ERROR",
            StoryGateError::Upload(_) => "UPLOAD_ERROR",
            StoryGateError::Configuration(_) => "CONFIG_ERROR",
            StoryGateError::Data(_) => "BAD_REQUEST",
        }
    }

    /// HTTP status the webserver should answer with for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            StoryGateError::Telegram(TelegramError::PeerNotFound { .. }) => StatusCode::BAD_REQUEST,
            StoryGateError::Telegram(TelegramError::StoryNotFound { .. }) => StatusCode::NOT_FOUND,
            StoryGateError::Telegram(TelegramError::StoryHasNoMedia { .. }) => {
                StatusCode::NOT_FOUND
            }
            StoryGateError::Telegram(TelegramError::NotConnected { .. })
            | StoryGateError::Telegram(TelegramError::NotAuthorized) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            StoryGateError::Telegram(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StoryGateError::Network(_) => StatusCode::BAD_GATEWAY,
            StoryGateError::Upload(_) => StatusCode::BAD_GATEWAY,
            StoryGateError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StoryGateError::Data(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping_matches_contract() {
        assert_eq!(
            StoryGateError::peer_not_found("nobody").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            StoryGateError::story_not_found("user", 7).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            StoryGateError::invalid_story_url("https://example.com").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            StoryGateError::upload_error("boom").http_status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn display_includes_context() {
        let err = StoryGateError::story_not_found("alice", 42);
        assert_eq!(err.to_string(), "Telegram Error: Story 42 not found for alice");
        assert_eq!(err.code(), "STORY_NOT_FOUND");
    }

    #[test]
    fn invalid_url_mentions_expected_shape() {
        let err = StoryGateError::invalid_story_url("ftp://nope");
        assert!(err.to_string().contains("t.me/username/s/123456"));
    }
}
