//! Telegram client integration built on grammers
//!
//! `client` owns the process-wide client handle and its session;
//! `stories` locates stories in a peer's collections and downloads their
//! media; `media` classifies story media into kind + mime type.

pub mod client;
pub mod media;
pub mod stories;

pub use client::{get_client, shutdown_client};
pub use media::{MediaKind, StoryMedia};
pub use stories::{find_story, LocatedStory, StoryScope};
