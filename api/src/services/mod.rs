//! Application services.
//!
//! Each service holds repository handles and a clock, fetches what it
//! needs, checks ownership inline and then mutates or rejects.

pub mod bookings;
pub mod events;
pub mod listings;
pub mod users;

pub use bookings::BookingService;
pub use events::EventService;
pub use listings::ListingService;
pub use users::UserService;
