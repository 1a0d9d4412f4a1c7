//! Route table

use super::handlers::{auth, customers, invoices};
use super::host::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Build every dashboard route
///
/// - GET /health, /healthz - liveness probe
/// - GET|POST /login, POST /logout - session management
/// - GET /dashboard - redirect to the invoices listing
/// - /dashboard/invoices/... - listing, create, edit, delete
/// - /dashboard/customers/... - listing, create, edit, delete
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(auth::health_check))
        .route("/healthz", get(auth::health_check))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(auth::dashboard_home))
        .route("/dashboard/invoices", get(invoices::list))
        .route(
            "/dashboard/invoices/create",
            get(invoices::create_form).post(invoices::create),
        )
        .route(
            "/dashboard/invoices/{id}/edit",
            get(invoices::edit_form).post(invoices::update),
        )
        .route("/dashboard/invoices/{id}/delete", post(invoices::delete))
        .route("/dashboard/customers", get(customers::list))
        .route(
            "/dashboard/customers/create",
            get(customers::create_form).post(customers::create),
        )
        .route(
            "/dashboard/customers/{id}/edit",
            get(customers::edit_form).post(customers::update),
        )
        .route("/dashboard/customers/{id}/delete", post(customers::delete))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
