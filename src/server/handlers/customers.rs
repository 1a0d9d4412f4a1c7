//! Customer pages: listing with totals, create/edit forms and delete

use super::{FormMode, ListParams, after_delete, cache_key, navigate, not_found_page};
use crate::core::error::{DashboardError, DashboardResult, MutationError};
use crate::core::revalidate::CUSTOMERS_PATH;
use crate::core::validation::FormData;
use crate::entities::AVATAR_IMAGES;
use crate::entities::customer::{FIELD_EMAIL, FIELD_IMAGE_URL, FIELD_NAME};
use crate::mutations;
use crate::server::host::AppState;
use crate::server::pages::{CustomerFormView, CustomerLine, CustomerListView, FormState};
use crate::server::session::{RequireSession, take_flash};
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::PrivateCookieJar;

const ENTITY: &str = "Customer";
const FIELDS: &[&str] = &[FIELD_NAME, FIELD_EMAIL, FIELD_IMAGE_URL];

/// GET /dashboard/customers?query=
pub async fn list(
    RequireSession(_): RequireSession,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    uri: Uri,
    jar: PrivateCookieJar,
) -> DashboardResult<(PrivateCookieJar, Html<String>)> {
    let (jar, flash) = take_flash(jar);
    let key = cache_key(&uri);

    if flash.is_none() {
        if let Some(html) = state.cache.get(&key) {
            tracing::debug!(path = %key, "serving cached customers page");
            return Ok((jar, Html(html)));
        }
    }

    let generation = state.cache.generation();
    let rows = state
        .customers
        .search(&params.query)
        .await
        .map_err(DashboardError::storage)?;

    let cacheable = flash.is_none();
    let html = state.pages.render(
        "customers/list.html",
        &CustomerListView {
            customers: rows.into_iter().map(CustomerLine::from).collect(),
            query: params.query.clone(),
            flash,
        },
    )?;

    if cacheable {
        state.cache.insert_if_fresh(key, html.0.clone(), generation);
    }
    Ok((jar, html))
}

fn render_form(state: &AppState, mode: FormMode, form: FormState) -> DashboardResult<Html<String>> {
    state.pages.render(
        "customers/form.html",
        &CustomerFormView {
            heading: mode.heading(ENTITY),
            action: mode.action(CUSTOMERS_PATH),
            avatars: AVATAR_IMAGES,
            form,
        },
    )
}

fn rejected(
    state: &AppState,
    mode: FormMode,
    form: &FormData,
    err: MutationError,
) -> DashboardResult<Response> {
    let view = FormState::rejected(FIELDS, form, err.field_errors(), err.message());
    let html = render_form(state, mode, view)?;
    Ok((err.status_code(), html).into_response())
}

/// GET /dashboard/customers/create
pub async fn create_form(
    RequireSession(_): RequireSession,
    State(state): State<AppState>,
) -> DashboardResult<Html<String>> {
    render_form(&state, FormMode::Create, FormState::blank(FIELDS))
}

/// POST /dashboard/customers/create
pub async fn create(
    RequireSession(_): RequireSession,
    State(state): State<AppState>,
    form: FormData,
) -> DashboardResult<Response> {
    match mutations::create_customer(state.customers.as_ref(), &state.cache, &form).await {
        Ok(done) => Ok(navigate(done, CUSTOMERS_PATH)),
        Err(err) => rejected(&state, FormMode::Create, &form, err),
    }
}

/// GET /dashboard/customers/{id}/edit
pub async fn edit_form(
    RequireSession(_): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DashboardResult<Response> {
    let customer = state
        .customers
        .get(&id)
        .await
        .map_err(DashboardError::storage)?;

    match customer {
        Some(customer) => {
            let html = render_form(&state, FormMode::Edit(id), FormState::from_customer(&customer))?;
            Ok(html.into_response())
        }
        None => not_found_page(&state, "customer", CUSTOMERS_PATH),
    }
}

/// POST /dashboard/customers/{id}/edit
pub async fn update(
    RequireSession(_): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormData,
) -> DashboardResult<Response> {
    match mutations::update_customer(state.customers.as_ref(), &state.cache, &id, &form).await {
        Ok(done) => Ok(navigate(done, CUSTOMERS_PATH)),
        Err(err) => rejected(&state, FormMode::Edit(id), &form, err),
    }
}

/// POST /dashboard/customers/{id}/delete
pub async fn delete(
    RequireSession(_): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: PrivateCookieJar,
) -> (PrivateCookieJar, Redirect) {
    let result = mutations::delete_customer(state.customers.as_ref(), &state.cache, &id).await;
    after_delete(&state, jar, result, CUSTOMERS_PATH)
}
