//! Business metrics for the marketplace.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `marketplace_bookings_total{status}` - Bookings by lifecycle step (pending, cancelled)
//! - `marketplace_listings_total{op}` - Listing writes (created, updated, deleted)
//! - `marketplace_events_created_total` - Events created
//!
//! ## Histograms
//! - `marketplace_booking_nights` - Length of stay of new bookings

use metrics::{describe_counter, describe_histogram};

/// Initialize and register all business metrics descriptions.
///
/// This should be called once at application startup, before any metrics are recorded.
pub fn register_business_metrics() {
    describe_counter!(
        "marketplace_bookings_total",
        "Total number of bookings by status (pending, cancelled)"
    );
    describe_histogram!(
        "marketplace_booking_nights",
        "Number of nights per created booking"
    );
    describe_counter!(
        "marketplace_listings_total",
        "Total number of listing writes by operation (created, updated, deleted)"
    );
    describe_counter!(
        "marketplace_events_created_total",
        "Total number of events created"
    );

    tracing::info!("Business metrics registered");
}

/// Record a booking created in the `pending` state.
///
/// # Arguments
///
/// * `nights` - Length of the stay
#[allow(clippy::cast_precision_loss)]
pub fn record_booking_created(nights: i64) {
    metrics::counter!("marketplace_bookings_total", "status" => "pending").increment(1);
    metrics::histogram!("marketplace_booking_nights").record(nights as f64);
    tracing::debug!(nights, "Recorded booking_created metric");
}

/// Record a booking cancelled by its guest.
pub fn record_booking_cancelled() {
    metrics::counter!("marketplace_bookings_total", "status" => "cancelled").increment(1);
    tracing::debug!("Recorded booking_cancelled metric");
}

/// Record a listing write.
///
/// # Arguments
///
/// * `op` - `created`, `updated` or `deleted`
pub fn record_listing(op: &'static str) {
    metrics::counter!("marketplace_listings_total", "op" => op).increment(1);
    tracing::debug!(op, "Recorded listing metric");
}

/// Record an event created.
pub fn record_event_created() {
    metrics::counter!("marketplace_events_created_total").increment(1);
    tracing::debug!("Recorded event_created metric");
}
