//! Admin document API endpoints.

use axum::{extract::State, Json};

use super::SuccessResponse;
use crate::errors::{messages, AppError};
use crate::models::{
    now_timestamp, Document, DocumentView, EditLogEntry, UpdateDocumentRequest, MAIN_DOCUMENT_ID,
    RECENT_EDITORS_LIMIT,
};
use crate::AppState;

/// GET /admin/document - Get the shared document and its recent editors.
pub async fn get_document(State(state): State<AppState>) -> Result<Json<DocumentView>, AppError> {
    let repo = match state.storage.repository().await {
        Ok(repo) => repo,
        Err(e) => match AppError::from(e) {
            AppError::ConfigurationMissing => {
                return Ok(Json(DocumentView {
                    error: Some(messages::DATABASE_NOT_CONFIGURED.to_string()),
                    document: Document::unconfigured_placeholder(now_timestamp()),
                    editors: Vec::new(),
                }));
            }
            other => return Err(other),
        },
    };

    let document = match repo.find_document(MAIN_DOCUMENT_ID).await? {
        Some(document) => document,
        None => {
            let document = Document::initial(now_timestamp());
            repo.insert_document_if_absent(&document).await?;
            tracing::info!("Created initial admin document");
            document
        }
    };

    let editors = repo.recent_editors(RECENT_EDITORS_LIMIT).await?;

    Ok(Json(DocumentView {
        error: None,
        document,
        editors,
    }))
}

/// POST /admin/document - Overwrite the shared document.
pub async fn update_document(
    State(state): State<AppState>,
    Json(request): Json<UpdateDocumentRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.storage.is_configured() {
        return Err(AppError::ConfigurationMissing);
    }

    let Some(content) = request.content() else {
        return Err(AppError::Validation(messages::CONTENT_REQUIRED.to_string()));
    };
    let author = request.author();

    let repo = state.storage.repository().await?;
    let now = now_timestamp();

    repo.upsert_document(&Document {
        id: MAIN_DOCUMENT_ID.to_string(),
        content: content.to_string(),
        last_updated: now.clone(),
        last_updated_by: author.to_string(),
    })
    .await?;

    // Not atomic with the write above; a failure here leaves the edit unlogged.
    repo.append_edit(&EditLogEntry {
        document_id: MAIN_DOCUMENT_ID.to_string(),
        username: author.to_string(),
        timestamp: now,
    })
    .await?;

    tracing::debug!(editor = %author, "Admin document updated");

    Ok(Json(SuccessResponse::ok()))
}
