//! Shared admin document and its edit log.

use serde::{Deserialize, Serialize};

/// Key of the single shared document.
pub const MAIN_DOCUMENT_ID: &str = "main";

/// Maximum number of editors shown alongside the document.
pub const RECENT_EDITORS_LIMIT: i64 = 10;

pub const SYSTEM_AUTHOR: &str = "System";
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

const DEFAULT_CONTENT: &str = "# Welcome to the Secret Admin Document\n\nThis is a collaborative document that anyone can edit. Use it for team notes, documentation, or anything else you need to share.";

const UNCONFIGURED_CONTENT: &str = "# Welcome to the Secret Admin Document\n\nDatabase is not configured. Please set DASH_DATABASE_URL environment variable.";

/// The collaborative document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub content: String,
    pub last_updated: String,
    pub last_updated_by: String,
}

impl Document {
    /// The document created on first read.
    pub fn initial(now: String) -> Self {
        Self::system(DEFAULT_CONTENT, now)
    }

    /// Placeholder shown while storage is not configured.
    pub fn unconfigured_placeholder(now: String) -> Self {
        Self::system(UNCONFIGURED_CONTENT, now)
    }

    fn system(content: &str, now: String) -> Self {
        Self {
            id: MAIN_DOCUMENT_ID.to_string(),
            content: content.to_string(),
            last_updated: now,
            last_updated_by: SYSTEM_AUTHOR.to_string(),
        }
    }
}

/// One row of the append-only edit log.
#[derive(Debug, Clone)]
pub struct EditLogEntry {
    pub document_id: String,
    pub username: String,
    pub timestamp: String,
}

/// Response body for `GET /admin/document`.
#[derive(Debug, Serialize)]
pub struct DocumentView {
    /// Set only in degraded mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub document: Document,
    pub editors: Vec<String>,
}

/// Request body for `POST /admin/document`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDocumentRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl UpdateDocumentRequest {
    /// The new content, if one was supplied.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// Editor name recorded on the document and in the log.
    pub fn author(&self) -> &str {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR)
    }
}
