/// Story domain types shared by the service layer and the routes
use serde::Serialize;

use crate::telegram::{MediaKind, StoryScope};

/// Metadata about a located story, serialized into response envelopes
#[derive(Debug, Clone, Serialize)]
pub struct StoryRecord {
    pub username: String,
    pub story_id: i32,
    pub scope: StoryScope,
    pub media_kind: MediaKind,
    pub mime_type: String,
    /// Unix timestamp the story was posted
    pub date: i64,
    /// Caption text, when the story has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Media size in bytes as reported by Telegram, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

/// A story's media downloaded into memory
#[derive(Debug, Clone)]
pub struct FetchedStory {
    pub record: StoryRecord,
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// A fetched story whose media has been pushed to the file host
#[derive(Debug, Clone, Serialize)]
pub struct LinkedStory {
    #[serde(flatten)]
    pub record: StoryRecord,
    pub download_url: String,
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StoryRecord {
        StoryRecord {
            username: "alice".to_string(),
            story_id: 42,
            scope: StoryScope::Pinned,
            media_kind: MediaKind::Video,
            mime_type: "video/mp4".to_string(),
            date: 1_700_000_000,
            caption: None,
            size: Some(1024),
        }
    }

    #[test]
    fn record_serializes_flat() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["story_id"], 42);
        assert_eq!(json["scope"], "pinned");
        assert_eq!(json["media_kind"], "video");
        assert!(json.get("caption").is_none());
    }

    #[test]
    fn linked_story_flattens_the_record() {
        let linked = LinkedStory {
            record: record(),
            download_url: "https://tmpfiles.org/dl/1/story_alice_42.mp4".to_string(),
            expires_in: 3600,
        };
        let json = serde_json::to_value(linked).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["expires_in"], 3600);
        assert!(json["download_url"].as_str().unwrap().contains("/dl/"));
    }
}
