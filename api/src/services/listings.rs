//! Listing service: host-owned accommodation with public search.

use crate::metrics;
use marketplace_core::environment::Clock;
use marketplace_core::error::DomainResult;
use marketplace_core::listing::{Hosted, Listing, ListingChanges, ListingSearch, NewListing};
use marketplace_core::pagination::Page;
use marketplace_core::repository::{ListingRepository, UserRepository};
use marketplace_core::user::{HostSummary, PublicProfile, User};
use marketplace_core::{DomainError, ListingId, UserId};
use std::sync::Arc;

/// Listing operations.
#[derive(Clone)]
pub struct ListingService {
    users: Arc<dyn UserRepository>,
    listings: Arc<dyn ListingRepository>,
    clock: Arc<dyn Clock>,
}

impl ListingService {
    /// Create a listing service.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        listings: Arc<dyn ListingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            listings,
            clock,
        }
    }

    async fn user(&self, id: UserId) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    async fn listing(&self, id: ListingId) -> DomainResult<Listing> {
        self.listings
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing", id))
    }

    /// Publish a new active listing owned by `host_id`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidArgument`] when a field is out of bounds
    /// - [`DomainError::NotFound`] when the host does not exist
    #[tracing::instrument(skip(self, request))]
    pub async fn create(
        &self,
        host_id: UserId,
        request: NewListing,
    ) -> DomainResult<Hosted<HostSummary>> {
        let listing = request.into_listing(host_id, self.clock.now())?;
        let host = self.user(host_id).await?;

        self.listings.insert(&listing).await?;

        metrics::record_listing("created");
        tracing::info!(listing_id = %listing.id, "Listing created");
        Ok(Hosted {
            listing,
            host: host.host_summary(),
        })
    }

    /// Search active listings, newest first, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] for a page or limit below 1.
    #[tracing::instrument(skip(self))]
    pub async fn find_all(&self, search: ListingSearch) -> DomainResult<Page<Hosted<HostSummary>>> {
        let (filter, page) = search.into_parts()?;
        let (rows, total) = self.listings.search(&filter, page).await?;
        Ok(Page::new(rows, total, page))
    }

    /// A listing with its host's public profile.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the listing does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn find_one(&self, id: ListingId) -> DomainResult<Hosted<PublicProfile>> {
        let listing = self.listing(id).await?;
        let host = self.user(listing.host_id).await?;
        Ok(Hosted {
            listing,
            host: host.public_profile(),
        })
    }

    /// Every listing of `host_id`, active or not, newest first.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_host(&self, host_id: UserId) -> DomainResult<Vec<Listing>> {
        Ok(self.listings.find_by_host(host_id).await?)
    }

    /// Apply a partial update on behalf of the owning host.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidArgument`] when a provided field is out of bounds
    /// - [`DomainError::NotFound`] when the listing does not exist, or is deleted
    ///   before the write
    /// - [`DomainError::Forbidden`] unless `user_id` owns the listing
    #[tracing::instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: ListingId,
        user_id: UserId,
        changes: ListingChanges,
    ) -> DomainResult<Hosted<HostSummary>> {
        changes.validate()?;

        let mut listing = self.listing(id).await?;
        listing.ensure_owned_by(user_id, "update")?;

        changes.apply(&mut listing, self.clock.now())?;
        if !self.listings.update(&listing).await? {
            return Err(DomainError::not_found("Listing", id));
        }
        let host = self.user(listing.host_id).await?;

        metrics::record_listing("updated");
        tracing::info!(listing_id = %id, "Listing updated");
        Ok(Hosted {
            listing,
            host: host.host_summary(),
        })
    }

    /// Hard-delete a listing on behalf of the owning host.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NotFound`] when the listing does not exist
    /// - [`DomainError::Forbidden`] unless `user_id` owns the listing
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: ListingId, user_id: UserId) -> DomainResult<()> {
        let listing = self.listing(id).await?;
        listing.ensure_owned_by(user_id, "delete")?;

        if !self.listings.delete(id).await? {
            return Err(DomainError::not_found("Listing", id));
        }

        metrics::record_listing("deleted");
        tracing::info!(listing_id = %id, "Listing deleted");
        Ok(())
    }
}
