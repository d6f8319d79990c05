//! Authentication extractors.
//!
//! Tokens are issued elsewhere. This service only resolves them: the bearer
//! token is hashed with SHA-256 and looked up in the session table, and only
//! unexpired sessions count.
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn my_bookings(
//!     session: SessionUser,
//!     State(state): State<AppState>,
//! ) -> Result<Json<DataEnvelope<BookingWithListing>>, AppError> {
//!     let bookings = state.bookings.find_my_bookings(session.user_id).await?;
//!     Ok(Json(bookings.into()))
//! }
//! ```

use crate::server::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use marketplace_core::UserId;
use marketplace_core::session::hash_token;
use marketplace_web::AppError;

/// Bearer token extracted from `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'")
        })?;

        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::unauthorized("Empty bearer token"));
        }

        Ok(Self(token.to_string()))
    }
}

/// Authenticated session user.
///
/// Use this as a handler parameter to require authentication.
#[derive(Debug, Clone, Copy)]
pub struct SessionUser {
    /// The authenticated user ID
    pub user_id: UserId,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = BearerToken::from_request_parts(parts, state).await?;

        let user_id = state
            .sessions
            .find_user_by_token_hash(&hash_token(&bearer.0), state.clock.now())
            .await
            .map_err(|e| {
                AppError::internal("Session validation failed").with_source(e.into())
            })?;

        match user_id {
            Some(user_id) => Ok(Self { user_id }),
            None => {
                tracing::debug!("Rejected unknown or expired session token");
                Err(AppError::unauthorized("Invalid or expired session"))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn bearer(header: Option<&str>) -> Result<BearerToken, AppError> {
        let mut builder = Request::builder();
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        BearerToken::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn extracts_bearer_token() {
        let token = bearer(Some("Bearer abc123")).await.unwrap();
        assert_eq!(token.0, "abc123");
    }

    #[tokio::test]
    async fn rejects_missing_malformed_and_empty_headers() {
        for header in [None, Some("Basic dXNlcjpwYXNz"), Some("Bearer "), Some("abc123")] {
            let err = bearer(header).await.unwrap_err();
            assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED, "{header:?}");
        }
    }
}
