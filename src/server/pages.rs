//! Page rendering with tera
//!
//! Templates are compiled into the binary. Handlers hand over view models
//! whose amounts and dates are already formatted for display.

use crate::core::error::DashboardResult;
use crate::core::format::{cents_to_input, format_currency, format_date};
use crate::core::validation::{FieldErrors, FormData};
use crate::entities::{Customer, CustomerRow, Invoice, InvoiceRow};
use axum::response::Html;
use serde::Serialize;
use std::collections::BTreeMap;
use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("not_found.html", include_str!("../../templates/not_found.html")),
    ("invoices/list.html", include_str!("../../templates/invoices/list.html")),
    ("invoices/form.html", include_str!("../../templates/invoices/form.html")),
    ("customers/list.html", include_str!("../../templates/customers/list.html")),
    ("customers/form.html", include_str!("../../templates/customers/form.html")),
];

/// Compiled page templates
#[derive(Debug)]
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> DashboardResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    /// Render a template with a serializable context
    pub fn render(&self, template: &str, view: &impl Serialize) -> DashboardResult<Html<String>> {
        let context = Context::from_serialize(view)?;
        let html = self.tera.render(template, &context)?;
        Ok(Html(html))
    }
}

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LoginView<'a> {
    pub email: &'a str,
    pub message: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct NotFoundView {
    pub entity: &'static str,
    pub back: &'static str,
}

/// One invoice line of the listing table
#[derive(Debug, Serialize)]
pub struct InvoiceLine {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: String,
    pub date: String,
    pub status: String,
}

impl From<InvoiceRow> for InvoiceLine {
    fn from(row: InvoiceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            amount: format_currency(row.amount),
            date: format_date(row.date),
            status: row.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvoiceListView {
    pub invoices: Vec<InvoiceLine>,
    pub query: String,
    pub page: u32,
    pub total_pages: u32,
    pub flash: Option<String>,
}

/// One customer line of the listing table
#[derive(Debug, Serialize)]
pub struct CustomerLine {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

impl From<CustomerRow> for CustomerLine {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            total_invoices: row.total_invoices,
            total_pending: format_currency(row.total_pending),
            total_paid: format_currency(row.total_paid),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerListView {
    pub customers: Vec<CustomerLine>,
    pub query: String,
    pub flash: Option<String>,
}

/// State of a create/edit form: submitted values, per-field errors and summary
///
/// Every declared field is present in both `values` and `errors`, so the
/// templates never see an undefined key.
#[derive(Debug, Serialize)]
pub struct FormState {
    pub values: BTreeMap<&'static str, String>,
    pub errors: BTreeMap<&'static str, Vec<String>>,
    pub message: Option<String>,
}

impl FormState {
    /// Empty form for the given fields
    pub fn blank(fields: &[&'static str]) -> Self {
        Self {
            values: fields.iter().map(|f| (*f, String::new())).collect(),
            errors: fields.iter().map(|f| (*f, Vec::new())).collect(),
            message: None,
        }
    }

    /// Form pre-filled from known values
    pub fn filled(fields: &[(&'static str, String)]) -> Self {
        let names: Vec<&'static str> = fields.iter().map(|(f, _)| *f).collect();
        let mut state = Self::blank(&names);
        for (field, value) in fields {
            state.values.insert(*field, value.clone());
        }
        state
    }

    /// Form echoing a rejected submission
    pub fn rejected(
        fields: &[&'static str],
        form: &FormData,
        errors: Option<&FieldErrors>,
        message: &str,
    ) -> Self {
        let mut state = Self::blank(fields);
        for &field in fields {
            if let Some(value) = form.get(field) {
                state.values.insert(field, value.to_string());
            }
            if let Some(errors) = errors {
                state.errors.insert(field, errors.get(field).to_vec());
            }
        }
        state.message = Some(message.to_string());
        state
    }

    pub fn from_invoice(invoice: &Invoice) -> Self {
        use crate::entities::invoice::{FIELD_AMOUNT, FIELD_CUSTOMER_ID, FIELD_STATUS};
        Self::filled(&[
            (FIELD_CUSTOMER_ID, invoice.customer_id.clone()),
            (FIELD_AMOUNT, cents_to_input(invoice.amount)),
            (FIELD_STATUS, invoice.status.as_str().to_string()),
        ])
    }

    pub fn from_customer(customer: &Customer) -> Self {
        use crate::entities::customer::{FIELD_EMAIL, FIELD_IMAGE_URL, FIELD_NAME};
        Self::filled(&[
            (FIELD_NAME, customer.name.clone()),
            (FIELD_EMAIL, customer.email.clone()),
            (FIELD_IMAGE_URL, customer.image_url.clone()),
        ])
    }
}

#[derive(Debug, Serialize)]
pub struct InvoiceFormView<'a> {
    pub heading: String,
    pub action: String,
    pub customers: &'a [crate::entities::CustomerField],
    pub statuses: &'static [&'static str],
    #[serde(flatten)]
    pub form: FormState,
}

#[derive(Debug, Serialize)]
pub struct CustomerFormView {
    pub heading: String,
    pub action: String,
    pub avatars: &'static [&'static str],
    #[serde(flatten)]
    pub form: FormState,
}
