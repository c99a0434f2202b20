use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::{
    arguments::is_debug_webserver_enabled,
    errors::StoryGateError,
    logger::{self, LogTag},
    stories::{self, parse_story_url},
    webserver::{
        state::AppState,
        utils::{error_from, error_response, success_response},
    },
};

/// Create story routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/story", get(story_link))
        .route("/direct", get(story_link_by_url))
        .route("/download", get(story_download))
        .route("/base64", get(story_base64))
        .route("/check", get(story_check))
}

/// Query parameters identifying a story by username + id
#[derive(Debug, Deserialize)]
struct StoryQuery {
    username: Option<String>,
    storyid: Option<String>,
}

impl StoryQuery {
    /// Validate both parameters; errors map to 400 envelopes
    fn resolve(&self) -> Result<(String, i32), StoryGateError> {
        let username = match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(StoryGateError::invalid_parameter(
                    "username",
                    self.username.as_deref().unwrap_or(""),
                    "username is required",
                ))
            }
        };

        let raw_id = self.storyid.as_deref().map(str::trim).unwrap_or("");
        let story_id: i32 = raw_id.parse().map_err(|_| {
            StoryGateError::invalid_parameter("storyid", raw_id, "must be a positive integer")
        })?;
        if story_id <= 0 {
            return Err(StoryGateError::invalid_parameter(
                "storyid",
                raw_id,
                "must be a positive integer",
            ));
        }

        Ok((username, story_id))
    }
}

/// Query parameter carrying a full t.me story link
#[derive(Debug, Deserialize)]
struct UrlQuery {
    url: Option<String>,
}

/// GET /api/story?username=&storyid=
async fn story_link(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StoryQuery>,
) -> Response {
    state.count_request();
    let (username, story_id) = match query.resolve() {
        Ok(parsed) => parsed,
        Err(e) => return error_from(&e),
    };

    if is_debug_webserver_enabled() {
        logger::debug(
            LogTag::Webserver,
            &format!("GET /api/story username={} storyid={}", username, story_id),
        );
    }

    match stories::fetch_story_with_link(&username, story_id).await {
        Ok(linked) => success_response(linked),
        Err(e) => failed(&e),
    }
}

/// GET /api/direct?url=
async fn story_link_by_url(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UrlQuery>,
) -> Response {
    state.count_request();
    let url = match query.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                "url parameter is required",
                None,
            )
        }
    };

    let story_ref = match parse_story_url(url) {
        Ok(parsed) => parsed,
        Err(e) => return error_from(&e),
    };

    if is_debug_webserver_enabled() {
        logger::debug(
            LogTag::Webserver,
            &format!(
                "GET /api/direct url={} -> {}/{}",
                url, story_ref.username, story_ref.story_id
            ),
        );
    }

    match stories::fetch_story_with_link(&story_ref.username, story_ref.story_id).await {
        Ok(linked) => success_response(linked),
        Err(e) => failed(&e),
    }
}

/// GET /api/download?username=&storyid=
///
/// Answers with the raw media bytes as a file attachment instead of a
/// JSON envelope.
async fn story_download(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StoryQuery>,
) -> Response {
    state.count_request();
    let (username, story_id) = match query.resolve() {
        Ok(parsed) => parsed,
        Err(e) => return error_from(&e),
    };

    match stories::fetch_story_media(&username, story_id).await {
        Ok(fetched) => {
            let disposition = format!("attachment; filename=\"{}\"", fetched.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, fetched.record.mime_type.clone()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                fetched.bytes,
            )
                .into_response()
        }
        Err(e) => failed(&e),
    }
}

/// GET /api/base64?username=&storyid=
async fn story_base64(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StoryQuery>,
) -> Response {
    state.count_request();
    let (username, story_id) = match query.resolve() {
        Ok(parsed) => parsed,
        Err(e) => return error_from(&e),
    };

    match stories::fetch_story_media(&username, story_id).await {
        Ok(fetched) => {
            let encoded = BASE64.encode(&fetched.bytes);
            let mut payload = match serde_json::to_value(&fetched.record) {
                Ok(value) => value,
                Err(e) => return error_from(&StoryGateError::from(e)),
            };
            payload["filename"] = json!(fetched.filename);
            payload["data"] = json!(encoded);
            success_response(payload)
        }
        Err(e) => failed(&e),
    }
}

/// GET /api/check?username=&storyid=
async fn story_check(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StoryQuery>,
) -> Response {
    state.count_request();
    let (username, story_id) = match query.resolve() {
        Ok(parsed) => parsed,
        Err(e) => return error_from(&e),
    };

    match stories::check_story(&username, story_id).await {
        Ok(record) => {
            let mut payload = match serde_json::to_value(&record) {
                Ok(value) => value,
                Err(e) => return error_from(&StoryGateError::from(e)),
            };
            payload["exists"] = json!(true);
            success_response(payload)
        }
        Err(e) => failed(&e),
    }
}

/// Log and map a domain error to its envelope
fn failed(err: &StoryGateError) -> Response {
    logger::warning(LogTag::Webserver, &err.to_string());
    error_from(err)
}
