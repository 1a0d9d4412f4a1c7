//! HTTP server: state, routes, handlers and page rendering
//!
//! [`DashboardBuilder`] wires the storage ports, identity provider and page
//! cache into an [`AppState`] and produces the axum `Router`.

pub mod builder;
pub mod handlers;
pub mod host;
pub mod pages;
pub mod router;
pub mod session;

pub use builder::DashboardBuilder;
pub use host::AppState;
pub use router::build_router;
pub use session::RequireSession;
