//! Invoice mutations

use crate::core::error::MutationError;
use crate::core::mutation::{Mutation, MutationResult};
use crate::core::revalidate::{CUSTOMERS_PATH, INVOICES_PATH, Revalidator};
use crate::core::service::InvoiceService;
use crate::core::validation::FormData;
use crate::entities::{INVOICE_SCHEMA, InvoiceInput};

const ENTITY: &str = "Invoice";

/// Listings that render invoice data: the invoices table and the per-customer totals
fn revalidate_listings(revalidator: &dyn Revalidator) {
    revalidator.revalidate_path(INVOICES_PATH);
    revalidator.revalidate_path(CUSTOMERS_PATH);
}

fn validate(form: &FormData, action: &str) -> Result<InvoiceInput, MutationError> {
    INVOICE_SCHEMA.parse::<InvoiceInput>(form).map_err(|errors| {
        tracing::debug!(action, %errors, "invoice form rejected");
        MutationError::validation(errors, action, ENTITY)
    })
}

/// Validate the form, insert one invoice dated today, then redirect to the listing
pub async fn create_invoice(
    store: &dyn InvoiceService,
    revalidator: &dyn Revalidator,
    form: &FormData,
) -> MutationResult {
    let input = validate(form, "Create")?;
    let invoice = input.into_new(super::today());

    let id = store.insert(invoice).await.map_err(|e| {
        tracing::warn!("failed to create invoice: {:#}", e);
        MutationError::persistence("Create", ENTITY)
    })?;

    tracing::info!(invoice_id = %id, "invoice created");
    revalidate_listings(revalidator);
    Ok(Mutation::redirect(id, INVOICES_PATH))
}

/// Validate the form and rewrite customer, amount and status of invoice `id`
pub async fn update_invoice(
    store: &dyn InvoiceService,
    revalidator: &dyn Revalidator,
    id: &str,
    form: &FormData,
) -> MutationResult {
    let input = validate(form, "Update")?;

    let affected = store.update(id, input.into_changes()).await.map_err(|e| {
        tracing::warn!(invoice_id = %id, "failed to update invoice: {:#}", e);
        MutationError::persistence("Update", ENTITY)
    })?;

    if affected == 0 {
        tracing::debug!(invoice_id = %id, "update matched no invoice");
    } else {
        tracing::info!(invoice_id = %id, "invoice updated");
    }
    revalidate_listings(revalidator);
    Ok(Mutation::redirect(id, INVOICES_PATH))
}

/// Delete invoice `id`; the caller stays on the current page
///
/// Deleting an id that does not exist is a successful no-op.
pub async fn delete_invoice(
    store: &dyn InvoiceService,
    revalidator: &dyn Revalidator,
    id: &str,
) -> MutationResult {
    let affected = store.delete(id).await.map_err(|e| {
        tracing::warn!(invoice_id = %id, "failed to delete invoice: {:#}", e);
        MutationError::persistence("Delete", ENTITY)
    })?;

    tracing::info!(invoice_id = %id, affected, "invoice deleted");
    revalidate_listings(revalidator);
    Ok(Mutation::stay(id, "Deleted Invoice"))
}
