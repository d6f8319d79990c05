//! Events and their linked listings.

use crate::rows::{self, event_columns, listing_columns};
use crate::{PostgresMarketplace, db_error};
use async_trait::async_trait;
use marketplace_core::event::{Event, EventFilter, LinkedListingFilter, NearbyListing};
use marketplace_core::ids::EventId;
use marketplace_core::repository::{EventRepository, StoreResult};
use sqlx::Row;

#[async_trait]
impl EventRepository for PostgresMarketplace {
    async fn insert(&self, event: &Event) -> StoreResult<()> {
        sqlx::query(
            r"
            INSERT INTO events (
                id, name, event_type, start_date, end_date, city, country,
                venue_latitude, venue_longitude, venue_name, description,
                is_active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(*event.id.as_uuid())
        .bind(&event.name)
        .bind(&event.event_type)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(&event.city)
        .bind(&event.country)
        .bind(event.venue_latitude)
        .bind(event.venue_longitude)
        .bind(&event.venue_name)
        .bind(event.description.as_deref())
        .bind(event.is_active)
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        tracing::info!(event_id = %event.id, event_type = %event.event_type, "Event inserted");
        Ok(())
    }

    async fn find_by_id(&self, id: EventId) -> StoreResult<Option<Event>> {
        let row = sqlx::query(concat!("SELECT ", event_columns!(), " FROM events WHERE id = $1"))
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(rows::event).transpose()
    }

    async fn search(&self, filter: &EventFilter) -> StoreResult<Vec<Event>> {
        let found = sqlx::query(concat!(
            "SELECT ",
            event_columns!(),
            r"
            FROM events
            WHERE is_active = $1
              AND ($2::text IS NULL OR city ILIKE $2)
              AND ($3::text IS NULL OR country ILIKE $3)
              AND ($4::text IS NULL OR event_type = $4)
              AND ($5::timestamptz IS NULL OR end_date >= $5)
              AND ($6::timestamptz IS NULL OR start_date <= $6)
            ORDER BY start_date ASC, id
            "
        ))
        .bind(filter.is_active)
        .bind(rows::contains_pattern(filter.city.as_deref()))
        .bind(rows::contains_pattern(filter.country.as_deref()))
        .bind(filter.event_type.as_deref().filter(|t| !t.is_empty()))
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        found.iter().map(rows::event).collect()
    }

    async fn linked_listings(
        &self,
        event_id: EventId,
        filter: &LinkedListingFilter,
    ) -> StoreResult<Vec<NearbyListing>> {
        let found = sqlx::query(concat!(
            "SELECT ",
            listing_columns!(),
            r",
                u.first_name AS host_first_name,
                u.last_name AS host_last_name,
                u.avatar_url AS host_avatar_url,
                u.reputation_score AS host_reputation_score,
                el.distance_to_venue
            FROM event_listings el
            JOIN listings l ON l.id = el.listing_id
            JOIN users u ON u.id = l.host_id
            WHERE el.event_id = $1
              AND l.is_active = TRUE
              AND ($2::text IS NULL OR l.accommodation_type = $2)
              AND ($3::float8 IS NULL OR l.price_per_night <= $3)
            ORDER BY el.created_at, l.id
            LIMIT $4
            "
        ))
        .bind(*event_id.as_uuid())
        .bind(filter.accommodation_type.map(|t| t.as_str()))
        .bind(filter.max_price)
        .bind(i64::from(filter.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        found
            .iter()
            .map(|row| {
                Ok(NearbyListing {
                    listing: rows::listing(row)?,
                    host: rows::host_summary(row)?,
                    distance_to_venue: row.try_get("distance_to_venue").map_err(db_error)?,
                })
            })
            .collect()
    }
}
