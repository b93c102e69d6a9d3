// SPDX-License-Identifier: MIT

//! User profile routes.

use crate::error::{AppError, Result};
use crate::models::user::CreateUserRequest;
use crate::models::{User, UserPreferences};
use crate::routes::ApiJson;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", post(create_user))
        .route("/api/users/{user_id}", get(get_user))
        .route("/api/users/{user_id}/preferences", put(update_preferences))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Sign up a new player. Emails are unique.
async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<CreateUserRequest>,
) -> Result<Json<User>> {
    input.validate()?;
    if let Some(prefs) = &input.preferences {
        prefs.validate()?;
    }

    if state.db.find_user_by_email(&input.email).await?.is_some() {
        return Err(AppError::BadRequest(
            "User with this email already exists".to_string(),
        ));
    }

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email: input.email,
        display_name: input.display_name,
        preferences: input.preferences.unwrap_or_default(),
        created_at: now_rfc3339(),
    };
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.id, "User created");
    Ok(Json(user))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<User>> {
    state
        .db
        .get_user(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}

async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ApiJson(preferences): ApiJson<UserPreferences>,
) -> Result<Json<MessageResponse>> {
    preferences.validate()?;

    if !state.db.update_preferences(&user_id, &preferences).await? {
        return Err(AppError::NotFound(format!("User {} not found", user_id)));
    }

    Ok(Json(MessageResponse {
        message: "Preferences updated successfully".to_string(),
    }))
}
