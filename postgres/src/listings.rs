//! Listings.

use crate::rows::{self, listing_columns};
use crate::{PostgresMarketplace, db_error};
use async_trait::async_trait;
use marketplace_core::ids::{ListingId, UserId};
use marketplace_core::listing::{Hosted, Listing, ListingFilter};
use marketplace_core::pagination::PageRequest;
use marketplace_core::repository::{ListingRepository, StoreResult};
use marketplace_core::user::HostSummary;

/// Shared `WHERE` clause for search and count. Binds `$1..$6`.
macro_rules! search_predicate {
    () => {
        r"
        WHERE l.is_active = TRUE
          AND ($1::text IS NULL OR l.city ILIKE $1)
          AND ($2::text IS NULL OR l.country ILIKE $2)
          AND ($3::text IS NULL OR l.accommodation_type = $3)
          AND ($4::float8 IS NULL OR l.price_per_night >= $4)
          AND ($5::float8 IS NULL OR l.price_per_night <= $5)
          AND ($6::int8 IS NULL OR l.max_guests >= $6)
        "
    };
}

const SEARCH_SQL: &str = concat!(
    "SELECT ",
    listing_columns!(),
    r",
        u.first_name AS host_first_name,
        u.last_name AS host_last_name,
        u.avatar_url AS host_avatar_url,
        u.reputation_score AS host_reputation_score
    FROM listings l
    JOIN users u ON u.id = l.host_id",
    search_predicate!(),
    "ORDER BY l.created_at DESC, l.id LIMIT $7 OFFSET $8"
);

const COUNT_SQL: &str = concat!(
    "SELECT COUNT(*) AS count FROM listings l",
    search_predicate!()
);

fn bind_filter<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    filter: &ListingFilter,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(rows::contains_pattern(filter.city.as_deref()))
        .bind(rows::contains_pattern(filter.country.as_deref()))
        .bind(filter.accommodation_type.map(|t| t.as_str()))
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(filter.max_guests)
}

#[async_trait]
impl ListingRepository for PostgresMarketplace {
    async fn insert(&self, listing: &Listing) -> StoreResult<()> {
        sqlx::query(
            r"
            INSERT INTO listings (
                id, host_id, title, description, accommodation_type,
                price_per_night, max_guests, address, city, country,
                latitude, longitude, amenities, images, is_active,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ",
        )
        .bind(*listing.id.as_uuid())
        .bind(*listing.host_id.as_uuid())
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.accommodation_type.as_str())
        .bind(listing.price_per_night)
        .bind(rows::to_i32(listing.max_guests))
        .bind(&listing.address)
        .bind(&listing.city)
        .bind(&listing.country)
        .bind(listing.latitude)
        .bind(listing.longitude)
        .bind(&listing.amenities)
        .bind(&listing.images)
        .bind(listing.is_active)
        .bind(listing.created_at)
        .bind(listing.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        tracing::info!(listing_id = %listing.id, host_id = %listing.host_id, "Listing inserted");
        Ok(())
    }

    async fn find_by_id(&self, id: ListingId) -> StoreResult<Option<Listing>> {
        let row = sqlx::query(concat!(
            "SELECT ",
            listing_columns!(),
            " FROM listings l WHERE l.id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(rows::listing).transpose()
    }

    async fn search(
        &self,
        filter: &ListingFilter,
        page: PageRequest,
    ) -> StoreResult<(Vec<Hosted<HostSummary>>, u64)> {
        let limit = i64::from(page.limit());
        let offset = i64::try_from(page.skip()).unwrap_or(i64::MAX);

        let rows_query = bind_filter(sqlx::query(SEARCH_SQL), filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool);
        let count_query = bind_filter(sqlx::query(COUNT_SQL), filter).fetch_one(&self.pool);

        let (found, count_row) = tokio::try_join!(rows_query, count_query).map_err(db_error)?;

        let listings = found
            .iter()
            .map(|row| {
                Ok(Hosted {
                    listing: rows::listing(row)?,
                    host: rows::host_summary(row)?,
                })
            })
            .collect::<StoreResult<Vec<_>>>()?;

        Ok((listings, rows::count(&count_row)?))
    }

    async fn find_by_host(&self, host_id: UserId) -> StoreResult<Vec<Listing>> {
        let found = sqlx::query(concat!(
            "SELECT ",
            listing_columns!(),
            " FROM listings l WHERE l.host_id = $1 ORDER BY l.created_at DESC, l.id"
        ))
        .bind(*host_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        found.iter().map(rows::listing).collect()
    }

    async fn update(&self, listing: &Listing) -> StoreResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE listings SET
                title = $2,
                description = $3,
                accommodation_type = $4,
                price_per_night = $5,
                max_guests = $6,
                address = $7,
                city = $8,
                country = $9,
                latitude = $10,
                longitude = $11,
                amenities = $12,
                images = $13,
                is_active = $14,
                updated_at = $15
            WHERE id = $1
            ",
        )
        .bind(*listing.id.as_uuid())
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.accommodation_type.as_str())
        .bind(listing.price_per_night)
        .bind(rows::to_i32(listing.max_guests))
        .bind(&listing.address)
        .bind(&listing.city)
        .bind(&listing.country)
        .bind(listing.latitude)
        .bind(listing.longitude)
        .bind(&listing.amenities)
        .bind(&listing.images)
        .bind(listing.is_active)
        .bind(listing.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        let updated = result.rows_affected() > 0;
        if updated {
            tracing::info!(listing_id = %listing.id, "Listing updated");
        }
        Ok(updated)
    }

    async fn delete(&self, id: ListingId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(listing_id = %id, "Listing deleted");
        }
        Ok(deleted)
    }
}
