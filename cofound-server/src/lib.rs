//! cofound-server: HTTP backend for the cofound network
//!
//! Exposes user accounts, companies, the post feed, business cards,
//! subscriptions and favorites as an HTTP/JSON API backed by a single
//! SQLite database file.

pub mod auth;
pub mod db;
pub mod http;
pub mod models;

pub use http::{run_server, ServerConfig};
