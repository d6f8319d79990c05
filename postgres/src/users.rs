//! Users and sessions.

use crate::rows::{self, user_columns};
use crate::{PostgresMarketplace, db_error};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marketplace_core::ids::UserId;
use marketplace_core::repository::{SessionRepository, StoreResult, UserRepository};
use marketplace_core::user::{ProfileChanges, User};
use sqlx::Row;

#[async_trait]
impl UserRepository for PostgresMarketplace {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let row = sqlx::query(concat!("SELECT ", user_columns!(), " FROM users WHERE id = $1"))
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(rows::user).transpose()
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<User>> {
        let row = sqlx::query(concat!(
            r"
            UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name  = COALESCE($3, last_name),
                phone      = COALESCE($4, phone),
                bio        = COALESCE($5, bio),
                avatar_url = COALESCE($6, avatar_url),
                is_host    = COALESCE($7, is_host),
                updated_at = $8
            WHERE id = $1
            RETURNING ",
            user_columns!()
        ))
        .bind(*id.as_uuid())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.phone.as_deref())
        .bind(changes.bio.as_deref())
        .bind(changes.avatar_url.as_deref())
        .bind(changes.is_host)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        if row.is_some() {
            tracing::info!(user_id = %id, "User profile updated");
        }
        row.as_ref().map(rows::user).transpose()
    }
}

#[async_trait]
impl SessionRepository for PostgresMarketplace {
    async fn find_user_by_token_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<UserId>> {
        let row = sqlx::query(
            r"
            SELECT user_id
            FROM sessions
            WHERE token_hash = $1 AND expires_at > $2
            ",
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(|r| r.try_get("user_id").map(UserId::from_uuid))
            .transpose()
            .map_err(db_error)
    }
}
