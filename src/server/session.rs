//! Session and flash cookies
//!
//! Both live in a [`PrivateCookieJar`], so their values are encrypted and
//! authenticated with the server's cookie [`Key`].

use super::host::AppState;
use crate::core::auth::Session;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::Duration;

pub const SESSION_COOKIE: &str = "dashboard_session";
pub const FLASH_COOKIE: &str = "dashboard_flash";

pub const LOGIN_PATH: &str = "/login";

fn build_cookie(name: &'static str, value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Store the signed-in user in the jar
pub fn start_session(
    jar: PrivateCookieJar,
    session: &Session,
    secure: bool,
) -> serde_json::Result<PrivateCookieJar> {
    let value = serde_json::to_string(session)?;
    Ok(jar.add(build_cookie(SESSION_COOKIE, value, Duration::hours(12), secure)))
}

pub fn end_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Read the session, if the jar holds a valid one
pub fn current_session(jar: &PrivateCookieJar) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;
    match serde_json::from_str(cookie.value()) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::debug!("discarding malformed session cookie: {}", e);
            None
        }
    }
}

/// Leave a one-shot message for the next page load
pub fn set_flash(jar: PrivateCookieJar, message: String, secure: bool) -> PrivateCookieJar {
    jar.add(build_cookie(FLASH_COOKIE, message, Duration::minutes(1), secure))
}

/// Take the pending flash message, clearing it from the jar
pub fn take_flash(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let message = cookie.value().to_string();
            (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), Some(message))
        }
        None => (jar, None),
    }
}

/// Guard for dashboard routes: requires a signed-in user
#[derive(Debug, Clone)]
pub struct RequireSession(pub Session);

/// No session; the client is sent to the login page
#[derive(Debug)]
pub struct LoginRequired;

impl IntoResponse for LoginRequired {
    fn into_response(self) -> Response {
        Redirect::to(LOGIN_PATH).into_response()
    }
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = LoginRequired;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_headers(&parts.headers, state.cookie_key.clone());

        match current_session(&jar) {
            Some(session) => Ok(RequireSession(session)),
            None => {
                tracing::debug!(path = %parts.uri.path(), "no session, redirecting to login");
                Err(LoginRequired)
            }
        }
    }
}
