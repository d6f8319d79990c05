//! Bookings.

use crate::rows::{self, booking_columns, listing_columns, user_columns};
use crate::{PostgresMarketplace, db_error};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marketplace_core::booking::{
    Booking, BookingDetail, BookingStatus, BookingWithListing, ListingSummary,
};
use marketplace_core::ids::{BookingId, ListingId, UserId};
use marketplace_core::listing::Hosted;
use marketplace_core::repository::{BookingRepository, StoreResult};
use marketplace_core::user::HostBadge;
use sqlx::Row;

#[async_trait]
impl BookingRepository for PostgresMarketplace {
    async fn insert(&self, booking: &Booking) -> StoreResult<()> {
        sqlx::query(
            r"
            INSERT INTO bookings (
                id, listing_id, guest_id, check_in, check_out,
                number_of_guests, total_price, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(*booking.id.as_uuid())
        .bind(*booking.listing_id.as_uuid())
        .bind(*booking.guest_id.as_uuid())
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(rows::to_i32(booking.number_of_guests))
        .bind(booking.total_price)
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        tracing::info!(
            booking_id = %booking.id,
            listing_id = %booking.listing_id,
            guest_id = %booking.guest_id,
            "Booking inserted"
        );
        Ok(())
    }

    async fn find_by_id(&self, id: BookingId) -> StoreResult<Option<Booking>> {
        let row = sqlx::query(concat!(
            "SELECT ",
            booking_columns!(),
            " FROM bookings b WHERE b.id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(rows::booking).transpose()
    }

    async fn find_detail(&self, id: BookingId) -> StoreResult<Option<BookingDetail>> {
        let Some(booking) = BookingRepository::find_by_id(self, id).await? else {
            return Ok(None);
        };

        let listing_row = sqlx::query(concat!(
            "SELECT ",
            listing_columns!(),
            r",
                u.first_name AS host_first_name,
                u.last_name AS host_last_name,
                u.phone AS host_phone,
                u.email AS host_email,
                u.avatar_url AS host_avatar_url
            FROM listings l
            JOIN users u ON u.id = l.host_id
            WHERE l.id = $1
            "
        ))
        .bind(*booking.listing_id.as_uuid())
        .fetch_optional(&self.pool);

        let guest_row = sqlx::query(concat!("SELECT ", user_columns!(), " FROM users WHERE id = $1"))
            .bind(*booking.guest_id.as_uuid())
            .fetch_optional(&self.pool);

        let (listing_row, guest_row) =
            tokio::try_join!(listing_row, guest_row).map_err(db_error)?;

        let (Some(listing_row), Some(guest_row)) = (listing_row, guest_row) else {
            return Ok(None);
        };

        Ok(Some(BookingDetail {
            booking,
            listing: Hosted {
                listing: rows::listing(&listing_row)?,
                host: rows::host_contact(&listing_row)?,
            },
            guest: rows::user(&guest_row)?.contact_card(),
        }))
    }

    async fn find_by_guest(&self, guest_id: UserId) -> StoreResult<Vec<BookingWithListing>> {
        let found = sqlx::query(concat!(
            "SELECT ",
            booking_columns!(),
            r",
                l.title AS listing_title,
                l.city AS listing_city,
                l.country AS listing_country,
                l.images AS listing_images,
                u.id AS host_id,
                u.first_name AS host_first_name,
                u.last_name AS host_last_name,
                u.avatar_url AS host_avatar_url
            FROM bookings b
            JOIN listings l ON l.id = b.listing_id
            JOIN users u ON u.id = l.host_id
            WHERE b.guest_id = $1
            ORDER BY b.created_at DESC, b.id
            "
        ))
        .bind(*guest_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        found
            .iter()
            .map(|row| {
                let booking = rows::booking(row)?;
                let listing = ListingSummary {
                    id: booking.listing_id,
                    title: row.try_get("listing_title").map_err(db_error)?,
                    city: row.try_get("listing_city").map_err(db_error)?,
                    country: row.try_get("listing_country").map_err(db_error)?,
                    images: row.try_get("listing_images").map_err(db_error)?,
                    host: Some(HostBadge {
                        id: UserId::from_uuid(row.try_get("host_id").map_err(db_error)?),
                        first_name: row.try_get("host_first_name").map_err(db_error)?,
                        last_name: row.try_get("host_last_name").map_err(db_error)?,
                        avatar_url: row.try_get("host_avatar_url").map_err(db_error)?,
                    }),
                };
                Ok(BookingWithListing { booking, listing })
            })
            .collect()
    }

    async fn count_overlapping(
        &self,
        listing_id: ListingId,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> StoreResult<u64> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS count
            FROM bookings
            WHERE listing_id = $1
              AND status <> 'cancelled'
              AND check_in < $3
              AND $2 < check_out
            ",
        )
        .bind(*listing_id.as_uuid())
        .bind(check_in)
        .bind(check_out)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        rows::count(&row)
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Booking>> {
        let row = sqlx::query(concat!(
            r"
            UPDATE bookings b SET status = $2, updated_at = $3
            WHERE b.id = $1
            RETURNING ",
            booking_columns!()
        ))
        .bind(*id.as_uuid())
        .bind(status.as_str())
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        if row.is_some() {
            tracing::info!(booking_id = %id, status = %status, "Booking status updated");
        }
        row.as_ref().map(rows::booking).transpose()
    }
}
