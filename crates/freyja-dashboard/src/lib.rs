//! freyja-dashboard
//!
//! The reviewer-facing web app: HTML pages and form actions for the
//! approval queue, a JSON API, and the health endpoint. `main.rs` wires
//! the configured store, publisher and generator into [`AppState`] and
//! starts the auto-publish sweep next to the server.

pub mod config;
pub mod error;
pub mod extract;
pub mod form;
pub mod middleware;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod views;

pub use routes::router;
pub use state::AppState;
