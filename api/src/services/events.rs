//! Event service, including the proximity search over linked listings.

use crate::metrics;
use marketplace_core::environment::Clock;
use marketplace_core::error::DomainResult;
use marketplace_core::event::{
    Event, EventFilter, EventSummary, ListingsNearEvent, NearbyQuery, NewEvent, rank_by_distance,
};
use marketplace_core::repository::EventRepository;
use marketplace_core::{DomainError, EventId};
use std::sync::Arc;

/// Event operations.
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventRepository>,
    clock: Arc<dyn Clock>,
}

impl EventService {
    /// Create an event service.
    #[must_use]
    pub fn new(events: Arc<dyn EventRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { events, clock }
    }

    /// Events matching `filter`, earliest first.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    #[tracing::instrument(skip(self))]
    pub async fn find_all(&self, filter: EventFilter) -> DomainResult<Vec<Event>> {
        Ok(self.events.search(&filter).await?)
    }

    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] when the event does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn find_one(&self, id: EventId) -> DomainResult<Event> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Event", id))
    }

    /// Record a new active event.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] naming the first offending field.
    #[tracing::instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: NewEvent) -> DomainResult<Event> {
        let event = request.into_event(self.clock.now())?;
        self.events.insert(&event).await?;

        metrics::record_event_created();
        tracing::info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    /// Listings linked to an event, nearest to the venue first.
    ///
    /// The store returns up to `limit` active listings matching the type and
    /// price restrictions; the distance cut-off and ordering are applied here.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidArgument`] for a limit below 1
    /// - [`DomainError::NotFound`] when the event does not exist
    #[tracing::instrument(skip(self))]
    pub async fn listings_near(
        &self,
        id: EventId,
        query: NearbyQuery,
    ) -> DomainResult<ListingsNearEvent> {
        let (filter, max_distance) = query.into_parts()?;
        let event = self.find_one(id).await?;

        let linked = self.events.linked_listings(id, &filter).await?;
        let fetched = linked.len();
        let listings = rank_by_distance(linked, max_distance);
        tracing::debug!(fetched, kept = listings.len(), "Ranked listings near event");

        Ok(ListingsNearEvent {
            event: EventSummary::from(&event),
            listings,
        })
    }
}
