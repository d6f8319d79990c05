//! `PostgreSQL` storage for the booking marketplace.
//!
//! [`PostgresMarketplace`] implements every repository trait from
//! `marketplace-core` over a single `sqlx` connection pool. Queries are
//! plain runtime-checked SQL; rows are mapped by hand so that a schema
//! mismatch surfaces as a [`StoreError`] instead of a panic.
//!
//! # Example
//!
//! ```no_run
//! use marketplace_postgres::{PoolSettings, PostgresMarketplace};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = PoolSettings::new("postgres://localhost/marketplace");
//! let pool = marketplace_postgres::connect(&settings).await?;
//! marketplace_postgres::migrate(&pool).await?;
//!
//! let store = PostgresMarketplace::new(pool);
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bookings;
mod events;
mod health;
mod listings;
mod pool;
mod rows;
mod users;

use marketplace_core::StoreError;
use sqlx::PgPool;

pub use pool::{PoolSettings, connect, migrate};

/// Every marketplace repository, backed by one connection pool.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct PostgresMarketplace {
    pool: PgPool,
}

impl PostgresMarketplace {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

pub(crate) fn db_error(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}
