//! Login, logout and the unauthenticated routes

use crate::core::auth::{SignIn, authenticate};
use crate::core::error::{DashboardError, DashboardResult};
use crate::core::revalidate::INVOICES_PATH;
use crate::core::validation::FormData;
use crate::server::host::AppState;
use crate::server::pages::LoginView;
use crate::server::session::{LOGIN_PATH, current_session, end_session, start_session};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde_json::{Value, json};

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> DashboardResult<Response> {
    if current_session(&jar).is_some() {
        return Ok(Redirect::to(INVOICES_PATH).into_response());
    }

    let html = state.pages.render(
        "login.html",
        &LoginView {
            email: "",
            message: None,
        },
    )?;
    Ok(html.into_response())
}

/// POST /login
///
/// A rejected sign-in re-renders the form with a 401; unexpected provider
/// failures propagate as a 500.
pub async fn login(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    form: FormData,
) -> DashboardResult<Response> {
    match authenticate(state.identity.as_ref(), &form).await? {
        SignIn::Authenticated(session) => {
            let jar = start_session(jar, &session, state.secure_cookies)
                .map_err(|e| DashboardError::Internal(format!("session encoding: {}", e)))?;
            Ok((jar, Redirect::to(INVOICES_PATH)).into_response())
        }
        SignIn::Rejected(message) => {
            let html = state.pages.render(
                "login.html",
                &LoginView {
                    email: form.get("email").unwrap_or_default(),
                    message: Some(message),
                },
            )?;
            Ok((StatusCode::UNAUTHORIZED, html).into_response())
        }
    }
}

/// POST /logout
pub async fn logout(jar: PrivateCookieJar) -> (PrivateCookieJar, Redirect) {
    (end_session(jar), Redirect::to(LOGIN_PATH))
}

/// GET /dashboard
pub async fn dashboard_home() -> Redirect {
    Redirect::to(INVOICES_PATH)
}

/// GET /health, /healthz
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-dashboard"
    }))
}
