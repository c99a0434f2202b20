//! Story domain layer
//!
//! `url` parses t.me story links, `types` defines the records the routes
//! serialize, `service` orchestrates lookup, download and upload.

pub mod service;
pub mod types;
pub mod url;

pub use service::{check_story, fetch_story_media, fetch_story_with_link};
pub use types::{FetchedStory, LinkedStory, StoryRecord};
pub use url::{clean_username, parse_story_url, StoryRef};
