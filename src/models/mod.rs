//! Data models for the dashboard backend.
//!
//! Field names match the JSON the dashboard front end already consumes.

mod document;
mod user;

pub use document::*;
pub use user::*;

use chrono::{SecondsFormat, Utc};

/// Current time as an RFC 3339 UTC string with millisecond precision.
///
/// Stored timestamps sort lexically in chronological order.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
