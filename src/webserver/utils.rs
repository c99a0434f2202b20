/// Response envelope helpers shared by all routes
///
/// Every JSON endpoint answers with a flat envelope:
///   success: {"success": true, ...payload fields...}
///   failure: {"success": false, "error": "...", "code": "..."}
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::StoryGateError;
use crate::logger::{self, LogTag};

/// 200 envelope with the payload's fields flattened alongside `success`
pub fn success_response<T: Serialize>(data: T) -> Response {
    let payload = match serde_json::to_value(data) {
        Ok(value) => value,
        Err(e) => {
            logger::error(
                LogTag::Webserver,
                &format!("Failed to serialize response payload: {}", e),
            );
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERIALIZATION_ERROR",
                "Failed to serialize response",
                None,
            );
        }
    };

    let mut envelope = json!({ "success": true });
    merge_payload(&mut envelope, payload);
    (StatusCode::OK, Json(envelope)).into_response()
}

/// Error envelope with machine code, message, and optional details
pub fn error_response(
    status: StatusCode,
    code: &str,
    message: &str,
    details: Option<Value>,
) -> Response {
    let mut envelope = json!({
        "success": false,
        "code": code,
        "error": message,
    });
    if let Some(details) = details {
        envelope["details"] = details;
    }
    (status, Json(envelope)).into_response()
}

/// Error envelope derived from a domain error
pub fn error_from(err: &StoryGateError) -> Response {
    error_response(err.http_status(), err.code(), &err.to_string(), None)
}

/// Flatten an object payload into the envelope; non-object payloads go
/// under a `data` key
fn merge_payload(envelope: &mut Value, payload: Value) {
    match payload {
        Value::Object(map) => {
            for (key, value) in map {
                envelope[key] = value;
            }
        }
        other => {
            envelope["data"] = other;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Payload {
        username: String,
        story_id: i32,
    }

    #[test]
    fn object_payloads_are_flattened() {
        let mut envelope = json!({ "success": true });
        let payload = serde_json::to_value(Payload {
            username: "alice".to_string(),
            story_id: 42,
        })
        .unwrap();
        merge_payload(&mut envelope, payload);
        assert_eq!(envelope["success"], true);
        assert_eq!(envelope["username"], "alice");
        assert_eq!(envelope["story_id"], 42);
    }

    #[test]
    fn scalar_payloads_land_under_data() {
        let mut envelope = json!({ "success": true });
        merge_payload(&mut envelope, json!("hello"));
        assert_eq!(envelope["data"], "hello");
    }
}
