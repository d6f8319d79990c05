//! User profiles.

use marketplace_core::environment::Clock;
use marketplace_core::error::DomainResult;
use marketplace_core::repository::UserRepository;
use marketplace_core::user::{ProfileChanges, PublicProfile, User};
use marketplace_core::{DomainError, UserId};
use std::sync::Arc;

/// Profile operations.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    /// Create a user service.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    /// The full profile, for the user themselves.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the user does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn find_one(&self, id: UserId) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    /// What anyone may see about a user.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the user does not exist.
    pub async fn find_public(&self, id: UserId) -> DomainResult<PublicProfile> {
        Ok(self.find_one(id).await?.public_profile())
    }

    /// Update the caller's own profile.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidArgument`] when a provided name is blank
    /// - [`DomainError::Forbidden`] when `caller_id` is not `id`
    /// - [`DomainError::NotFound`] when the user does not exist
    #[tracing::instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: UserId,
        caller_id: UserId,
        changes: ProfileChanges,
    ) -> DomainResult<User> {
        changes.validate()?;
        if id != caller_id {
            return Err(DomainError::forbidden("You can only update your own profile"));
        }

        let user = self
            .users
            .update_profile(id, &changes, self.clock.now())
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        tracing::info!(user_id = %id, "Profile updated");
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use marketplace_testing::{InMemoryMarketplace, fixtures, test_clock};

    fn service(store: &InMemoryMarketplace) -> UserService {
        UserService::new(Arc::new(store.clone()), Arc::new(test_clock()))
    }

    #[tokio::test]
    async fn public_profile_hides_contact_details() {
        let store = InMemoryMarketplace::new();
        let user = store.insert_user(fixtures::user("ana@example.com"));

        let public = service(&store).find_public(user.id).await.unwrap();
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("email").is_none());
        assert!(json.get("phone").is_none());
        assert_eq!(json["firstName"], "ana");
    }

    #[tokio::test]
    async fn users_update_only_themselves() {
        let store = InMemoryMarketplace::new();
        let ana = store.insert_user(fixtures::user("ana@example.com"));
        let bo = store.insert_user(fixtures::user("bo@example.com"));
        let changes = ProfileChanges {
            bio: Some("Surfer".to_string()),
            is_host: Some(true),
            ..ProfileChanges::default()
        };

        let err = service(&store)
            .update(ana.id, bo.id, changes.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let updated = service(&store).update(ana.id, ana.id, changes).await.unwrap();
        assert_eq!(updated.bio.as_deref(), Some("Surfer"));
        assert!(updated.is_host);
        assert_eq!(updated.first_name, "ana");
    }

    #[tokio::test]
    async fn blank_names_are_rejected() {
        let store = InMemoryMarketplace::new();
        let ana = store.insert_user(fixtures::user("ana@example.com"));
        let err = service(&store)
            .update(
                ana.id,
                ana.id,
                ProfileChanges {
                    first_name: Some("  ".to_string()),
                    ..ProfileChanges::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let store = InMemoryMarketplace::new();
        let err = service(&store).find_one(UserId::new()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { resource: "User", .. }));
    }
}
