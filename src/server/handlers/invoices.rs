//! Invoice pages: listing, create/edit forms and delete

use super::{FormMode, ListParams, after_delete, cache_key, navigate, not_found_page};
use crate::core::error::{DashboardError, DashboardResult, MutationError};
use crate::core::revalidate::INVOICES_PATH;
use crate::core::service::Page;
use crate::core::validation::FormData;
use crate::entities::InvoiceStatus;
use crate::entities::invoice::{FIELD_AMOUNT, FIELD_CUSTOMER_ID, FIELD_STATUS};
use crate::mutations;
use crate::server::host::AppState;
use crate::server::pages::{FormState, InvoiceFormView, InvoiceLine, InvoiceListView};
use crate::server::session::{RequireSession, take_flash};
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::PrivateCookieJar;

const ENTITY: &str = "Invoice";
const FIELDS: &[&str] = &[FIELD_CUSTOMER_ID, FIELD_AMOUNT, FIELD_STATUS];

/// GET /dashboard/invoices?query=&page=
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
            tracing::debug!(path = %key, "serving cached invoices page");
            return Ok((jar, Html(html)));
        }
    }

    let generation = state.cache.generation();
    let total = state
        .invoices
        .count(&params.query)
        .await
        .map_err(DashboardError::storage)?;
    let page = Page::new(params.page_number(), state.items_per_page);
    let rows = state
        .invoices
        .search(&params.query, page)
        .await
        .map_err(DashboardError::storage)?;

    let cacheable = flash.is_none();
    let html = state.pages.render(
        "invoices/list.html",
        &InvoiceListView {
            invoices: rows.into_iter().map(InvoiceLine::from).collect(),
            query: params.query.clone(),
            page: page.number,
            total_pages: Page::total_pages(total, state.items_per_page),
            flash,
        },
    )?;

    if cacheable {
        state.cache.insert_if_fresh(key, html.0.clone(), generation);
    }
    Ok((jar, html))
}

async fn render_form(
    state: &AppState,
    mode: FormMode,
    form: FormState,
) -> DashboardResult<Html<String>> {
    let customers = state
        .customers
        .list()
        .await
        .map_err(DashboardError::storage)?;

    state.pages.render(
        "invoices/form.html",
        &InvoiceFormView {
            heading: mode.heading(ENTITY),
            action: mode.action(INVOICES_PATH),
            customers: &customers,
            statuses: InvoiceStatus::NAMES,
            form,
        },
    )
}

/// Re-render the submitted form with the mutation's errors
async fn rejected(
    state: &AppState,
    mode: FormMode,
    form: &FormData,
    err: MutationError,
) -> DashboardResult<Response> {
    let view = FormState::rejected(FIELDS, form, err.field_errors(), err.message());
    let html = render_form(state, mode, view).await?;
    Ok((err.status_code(), html).into_response())
}

/// GET /dashboard/invoices/create
pub async fn create_form(
    RequireSession(_): RequireSession,
    State(state): State<AppState>,
) -> DashboardResult<Html<String>> {
    render_form(&state, FormMode::Create, FormState::blank(FIELDS)).await
}

/// POST /dashboard/invoices/create
pub async fn create(
    RequireSession(_): RequireSession,
    State(state): State<AppState>,
    form: FormData,
) -> DashboardResult<Response> {
    match mutations::create_invoice(state.invoices.as_ref(), &state.cache, &form).await {
        Ok(done) => Ok(navigate(done, INVOICES_PATH)),
        Err(err) => rejected(&state, FormMode::Create, &form, err).await,
    }
}

/// GET /dashboard/invoices/{id}/edit
pub async fn edit_form(
    RequireSession(_): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> DashboardResult<Response> {
    let invoice = state
        .invoices
        .get(&id)
        .await
        .map_err(DashboardError::storage)?;

    match invoice {
        Some(invoice) => {
            let html =
                render_form(&state, FormMode::Edit(id), FormState::from_invoice(&invoice)).await?;
            Ok(html.into_response())
        }
        None => not_found_page(&state, "invoice", INVOICES_PATH),
    }
}

/// POST /dashboard/invoices/{id}/edit
pub async fn update(
    RequireSession(_): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormData,
) -> DashboardResult<Response> {
    match mutations::update_invoice(state.invoices.as_ref(), &state.cache, &id, &form).await {
        Ok(done) => Ok(navigate(done, INVOICES_PATH)),
        Err(err) => rejected(&state, FormMode::Edit(id), &form, err).await,
    }
}

/// POST /dashboard/invoices/{id}/delete
pub async fn delete(
    RequireSession(_): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: PrivateCookieJar,
) -> (PrivateCookieJar, Redirect) {
    let result = mutations::delete_invoice(state.invoices.as_ref(), &state.cache, &id).await;
    after_delete(&state, jar, result, INVOICES_PATH)
}
