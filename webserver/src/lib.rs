//! HTTP API for the school timetable engine
//!
//! Exposes the engine's collections, lesson moves, placement checks, conflicts,
//! weekly grids and whole-school import/export over JSON.

pub mod error;
pub mod state;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{ApiError, WebServerError, WebServerResult};
pub use state::WebServerState;
pub use types::*;
pub use webserver_impl::{MAX_BODY_BYTES, WebServer};
