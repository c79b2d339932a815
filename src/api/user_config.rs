//! User configuration API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::SuccessResponse;
use crate::auth::CallerIdentity;
use crate::errors::{messages, AppError};
use crate::models::{now_timestamp, ServerConfig, UpdateUserConfigRequest, UserConfigResponse};
use crate::AppState;

/// GET /user-config/{serverId} - Get the caller's configuration for one server.
pub async fn get_user_config(
    State(state): State<AppState>,
    CallerIdentity(discord_id): CallerIdentity,
    Path(server_id): Path<String>,
) -> Result<Json<UserConfigResponse>, AppError> {
    let repo = state.storage.repository().await?;

    let Some(user) = repo.find_user(&discord_id).await? else {
        return Err(AppError::NotFound(messages::USER_NOT_FOUND.to_string()));
    };

    let Some(server) = user.server(&server_id) else {
        return Err(AppError::NotFound(
            messages::SERVER_CONFIG_NOT_FOUND.to_string(),
        ));
    };

    tracing::debug!(discord_id = %user.discord_id, server_id = %server_id, "Serving server configuration");

    Ok(Json(UserConfigResponse {
        user: user.summary(),
        is_bot_added: server.is_bot_added().cloned(),
        server: server.clone(),
    }))
}

/// PUT /user-config/{serverId} - Replace the caller's configuration for one server.
pub async fn update_user_config(
    State(state): State<AppState>,
    CallerIdentity(discord_id): CallerIdentity,
    Path(server_id): Path<String>,
    Json(request): Json<UpdateUserConfigRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let repo = state.storage.repository().await?;

    let server = ServerConfig::replacement(
        request.server.unwrap_or_default(),
        &server_id,
        now_timestamp(),
    );

    let modified = repo
        .replace_server_config(&discord_id, &server_id, &server)
        .await?;

    if modified == 0 {
        tracing::warn!(
            discord_id = %discord_id,
            server_id = %server_id,
            "Server configuration update matched nothing"
        );
        return Err(AppError::UpdateFailed(
            messages::SERVER_UPDATE_FAILED.to_string(),
        ));
    }

    Ok(Json(SuccessResponse::ok()))
}
