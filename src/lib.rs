//! StoryGate: HTTP gateway for Telegram stories
//!
//! Accepts web requests identifying a story by username + id or a t.me
//! link, fetches the story through a Telegram client session, uploads
//! the media to a temporary file host, and answers with flat JSON
//! envelopes carrying a time-limited download link.

pub mod apis;
pub mod arguments;
pub mod config;
pub mod errors;
pub mod logger;
pub mod paths;
pub mod stories;
pub mod telegram;
pub mod webserver;
