/// tmpfiles.org API client
///
/// API: POST {base}/api/v1/upload with a multipart `file` field.
/// A successful response looks like:
///
/// ```json
/// {"status":"success","data":{"url":"https://tmpfiles.org/1234/story.jpg"}}
/// ```
///
/// The returned URL is the human page; the direct download link inserts
/// a `/dl/` segment after the host. Files are kept for 60 minutes.
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

use crate::apis::client::RateLimiter;
use crate::arguments::is_debug_upload_enabled;
use crate::errors::{StoryGateError, UploadError};
use crate::logger::{self, LogTag};

pub const DEFAULT_BASE_URL: &str = "https://tmpfiles.org";

/// Upload endpoint path under the base URL
const UPLOAD_PATH: &str = "/api/v1/upload";

/// Request timeout in seconds - uploads carry whole media files
pub const TIMEOUT_SECS: u64 = 60;

/// Rate limit (requests per minute) - tmpfiles has no published budget,
/// stay polite
pub const RATE_LIMIT_UPLOAD_PER_MINUTE: usize = 30;

/// tmpfiles keeps uploads for 60 minutes
pub const EXPIRES_IN_SECS: u64 = 3600;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    status: String,
    data: Option<UploadResponseData>,
}

#[derive(Debug, Deserialize)]
struct UploadResponseData {
    url: String,
}

/// Result of a successful upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Human-facing page URL as returned by the host
    pub page_url: String,
    /// Direct download URL (`/dl/` variant)
    pub download_url: String,
    /// Seconds until the host deletes the file
    pub expires_in: u64,
}

/// tmpfiles.org upload client
pub struct TmpFilesClient {
    client: reqwest::Client,
    base_url: String,
    enabled: bool,
    timeout: Duration,
    limiter_upload: RateLimiter,
}

impl TmpFilesClient {
    pub fn new(enabled: bool, base_url: &str, timeout_secs: u64) -> Result<Self, String> {
        if timeout_secs == 0 {
            return Err("Timeout must be greater than zero".to_string());
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            enabled,
            timeout: Duration::from_secs(timeout_secs),
            limiter_upload: RateLimiter::new(RATE_LIMIT_UPLOAD_PER_MINUTE),
        })
    }

    /// Client built from the `[upload]` config section
    pub fn from_config(config: &crate::config::UploadConfig) -> Result<Self, String> {
        Self::new(config.enabled, &config.base_url, config.timeout_secs)
    }

    /// Upload a media blob and return its time-limited download link
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<UploadedFile, StoryGateError> {
        if !self.enabled {
            return Err(StoryGateError::Upload(UploadError::Disabled));
        }

        let guard = self
            .limiter_upload
            .acquire()
            .await
            .map_err(StoryGateError::from)?;

        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .map_err(|e| StoryGateError::upload_error(format!("Invalid mime type: {}", e)))?;
        let form = Form::new().part("file", part);

        let endpoint = format!("{}{}", self.base_url, UPLOAD_PATH);
        if is_debug_upload_enabled() {
            logger::debug(
                LogTag::Upload,
                &format!("Uploading {} bytes ({}) to {}", size, mime_type, endpoint),
            );
        }

        let response = self
            .client
            .post(&endpoint)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await?;
        drop(guard);

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(StoryGateError::Upload(UploadError::HostRejected {
                status: status.as_u16(),
                body: truncate_body(&body),
            }));
        }

        let parsed: UploadResponse = serde_json::from_str(&body).map_err(|_| {
            StoryGateError::Upload(UploadError::MalformedResponse {
                response_body: truncate_body(&body),
            })
        })?;

        let page_url = match (parsed.status.as_str(), parsed.data) {
            ("success", Some(data)) => data.url,
            _ => {
                return Err(StoryGateError::Upload(UploadError::MalformedResponse {
                    response_body: truncate_body(&body),
                }))
            }
        };

        let download_url = to_direct_url(&page_url);
        if is_debug_upload_enabled() {
            logger::debug(
                LogTag::Upload,
                &format!("Upload complete: {}", download_url),
            );
        }

        Ok(UploadedFile {
            page_url,
            download_url,
            expires_in: EXPIRES_IN_SECS,
        })
    }
}

/// Convert a tmpfiles page URL into the direct `/dl/` download URL
///
/// `https://tmpfiles.org/1234/story.jpg` → `https://tmpfiles.org/dl/1234/story.jpg`
pub fn to_direct_url(page_url: &str) -> String {
    if let Some(rest) = page_url.strip_prefix("https://tmpfiles.org/") {
        if rest.starts_with("dl/") {
            return page_url.to_string();
        }
        return format!("https://tmpfiles.org/dl/{}", rest);
    }
    if let Some(rest) = page_url.strip_prefix("http://tmpfiles.org/") {
        return format!("http://tmpfiles.org/dl/{}", rest);
    }
    page_url.to_string()
}

/// Keep error bodies short enough for log lines and JSON envelopes
///
/// The cut is backed off to a char boundary so multibyte host responses
/// cannot split a codepoint.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_converts_to_direct_link() {
        assert_eq!(
            to_direct_url("https://tmpfiles.org/1234/story.jpg"),
            "https://tmpfiles.org/dl/1234/story.jpg"
        );
    }

    #[test]
    fn direct_link_is_left_alone() {
        assert_eq!(
            to_direct_url("https://tmpfiles.org/dl/1234/story.jpg"),
            "https://tmpfiles.org/dl/1234/story.jpg"
        );
    }

    #[test]
    fn foreign_urls_pass_through() {
        assert_eq!(
            to_direct_url("https://example.com/1234/story.jpg"),
            "https://example.com/1234/story.jpg"
        );
    }

    #[test]
    fn upload_response_parses() {
        let body = r#"{"status":"success","data":{"url":"https://tmpfiles.org/99/f.mp4"}}"#;
        let parsed: UploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, "success");
        assert_eq!(parsed.data.unwrap().url, "https://tmpfiles.org/99/f.mp4");
    }

    #[test]
    fn error_body_is_truncated() {
        let long = "x".repeat(500);
        assert_eq!(truncate_body(&long).len(), 203);
    }

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        // 'é' occupies bytes 199..201, straddling the cut point
        let body = format!("{}é and more", "a".repeat(199));
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated, format!("{}...", "a".repeat(199)));

        // Cut exactly on a boundary keeps the full codepoint count
        let emoji_body = "🦀".repeat(80); // 320 bytes
        let truncated = truncate_body(&emoji_body);
        assert_eq!(truncated.chars().filter(|c| *c == '🦀').count(), 50);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(TmpFilesClient::new(true, DEFAULT_BASE_URL, 0).is_err());
    }
}
