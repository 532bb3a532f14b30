//! HTTP layer: extractors and handlers
//!
//! The extractors wrap axum's own so that malformed bodies, paths and queries are
//! answered with the API's JSON error body instead of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::WebServerError;

pub mod handlers;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(WebServerError))]
pub struct ApiJson<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(WebServerError))]
pub struct ApiPath<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(WebServerError))]
pub struct ApiQuery<T>(pub T);
