//! User profile endpoints.

use crate::auth::SessionUser;
use crate::server::AppState;
use axum::{Json, extract::State};
use marketplace_core::UserId;
use marketplace_core::user::{ProfileChanges, PublicProfile, User};
use marketplace_web::{ApiJson, ApiPath, WebResult};

/// The caller's full profile.
pub async fn get_me(
    session: SessionUser,
    State(state): State<AppState>,
) -> WebResult<Json<User>> {
    let user = state.users.find_one(session.user_id).await?;
    Ok(Json(user))
}

/// Update the caller's profile.
pub async fn update_me(
    session: SessionUser,
    State(state): State<AppState>,
    ApiJson(changes): ApiJson<ProfileChanges>,
) -> WebResult<Json<User>> {
    let user = state
        .users
        .update(session.user_id, session.user_id, changes)
        .await?;
    Ok(Json(user))
}

/// Public profile of any user. No authentication required.
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> WebResult<Json<PublicProfile>> {
    let profile = state.users.find_public(id).await?;
    Ok(Json(profile))
}

/// Update a profile by id; only the user themselves may do so.
pub async fn update_user(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(changes): ApiJson<ProfileChanges>,
) -> WebResult<Json<User>> {
    let user = state.users.update(id, session.user_id, changes).await?;
    Ok(Json(user))
}
