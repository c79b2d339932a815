//! REST API module.
//!
//! Handlers for the admin document and the per-server user configuration.

mod document;
mod user_config;

pub use document::*;
pub use user_config::*;

use serde::Serialize;

/// Body returned by successful writes.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
