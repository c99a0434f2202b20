//! Axum webserver: HTTP surface of the story gateway

pub mod routes;
pub mod server;
pub mod state;
pub mod templates;
pub mod utils;

pub use server::{shutdown, start_server};
