//! HTTP server wiring: shared state, the router and the serve loop.

pub mod routes;
pub mod serve;
pub mod state;

pub use routes::build_router;
pub use serve::serve_with_grace;
pub use state::AppState;
