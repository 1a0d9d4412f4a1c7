//! HTTP handlers for the dashboard pages
//!
//! Every handler is a thin shell around a mutation or a read query: it
//! extracts the request, calls into `mutations`/storage, and turns the outcome
//! into a page, a redirect or an error response.

pub mod auth;
pub mod customers;
pub mod invoices;

use super::host::AppState;
use super::pages::NotFoundView;
use super::session::set_flash;
use crate::core::error::DashboardResult;
use crate::core::mutation::{Mutation, MutationResult, Navigation};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;

/// `?query=&page=` of a listing page
///
/// `page` is kept raw so that garbage falls back to the first page instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub query: String,
    pub page: Option<String>,
}

impl ListParams {
    pub fn page_number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }
}

/// Page cache key: request path with its query string
pub fn cache_key(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Whether a form creates a new record or edits an existing one
#[derive(Debug, Clone)]
pub enum FormMode {
    Create,
    Edit(String),
}

impl FormMode {
    pub fn heading(&self, entity: &str) -> String {
        match self {
            FormMode::Create => format!("Create {}", entity),
            FormMode::Edit(_) => format!("Edit {}", entity),
        }
    }

    pub fn action(&self, base: &str) -> String {
        match self {
            FormMode::Create => format!("{}/create", base),
            FormMode::Edit(id) => format!("{}/{}/edit", base, id),
        }
    }
}

/// Follow a successful create/update
pub fn navigate(done: Mutation, fallback: &'static str) -> Response {
    Redirect::to(done.navigation.target().unwrap_or(fallback)).into_response()
}

/// Turn a delete outcome into "back to the listing, with a message"
///
/// The mutation asks to stay on the current page; for a full-page form post
/// the equivalent is redirecting to the listing with the message in a flash
/// cookie. Failures are reported the same way.
pub fn after_delete(
    state: &AppState,
    jar: PrivateCookieJar,
    result: MutationResult,
    listing: &'static str,
) -> (PrivateCookieJar, Redirect) {
    let message = match result {
        Ok(Mutation {
            message,
            navigation: Navigation::Stay,
            ..
        }) => message,
        Ok(done) => {
            return (jar, Redirect::to(done.navigation.target().unwrap_or(listing)));
        }
        Err(err) => Some(err.message().to_string()),
    };

    let jar = match message {
        Some(message) => set_flash(jar, message, state.secure_cookies),
        None => jar,
    };
    (jar, Redirect::to(listing))
}

/// 404 page for an unknown record
pub fn not_found_page(
    state: &AppState,
    entity: &'static str,
    back: &'static str,
) -> DashboardResult<Response> {
    let html = state.pages.render("not_found.html", &NotFoundView { entity, back })?;
    Ok((StatusCode::NOT_FOUND, html).into_response())
}
