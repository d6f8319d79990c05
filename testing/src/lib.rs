//! # Marketplace Testing
//!
//! Testing utilities for the booking marketplace.
//!
//! This crate provides:
//! - [`InMemoryMarketplace`]: every repository trait backed by `HashMap`s
//! - [`FixedClock`]: deterministic time
//! - [`fixtures`]: ready-made users, listings and events
//!
//! ## Example
//!
//! ```
//! use marketplace_core::repository::UserRepository;
//! use marketplace_testing::{fixtures, InMemoryMarketplace};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryMarketplace::new();
//! let host = store.insert_user(fixtures::user("host@example.com"));
//!
//! let found = store.find_by_id(host.id).await?;
//! assert_eq!(found, Some(host));
//! # Ok(())
//! # }
//! ```

pub mod fixtures;
mod in_memory;

use chrono::{DateTime, Utc};
use marketplace_core::environment::Clock;

pub use in_memory::InMemoryMarketplace;

/// Mock implementations of environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use marketplace_testing::mocks::FixedClock;
    /// use marketplace_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(super::fixtures::epoch())
    }
}

pub use mocks::{FixedClock, test_clock};
