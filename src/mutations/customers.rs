//! Customer mutations

use crate::core::error::MutationError;
use crate::core::mutation::{Mutation, MutationResult};
use crate::core::revalidate::{CUSTOMERS_PATH, INVOICES_PATH, Revalidator};
use crate::core::service::CustomerService;
use crate::core::validation::FormData;
use crate::entities::{CUSTOMER_SCHEMA, CustomerInput};

const ENTITY: &str = "Customer";

fn validate(form: &FormData, action: &str) -> Result<CustomerInput, MutationError> {
    CUSTOMER_SCHEMA.parse::<CustomerInput>(form).map_err(|errors| {
        tracing::debug!(action, %errors, "customer form rejected");
        MutationError::validation(errors, action, ENTITY)
    })
}

/// Validate the form, insert one customer, then redirect to the listing
pub async fn create_customer(
    store: &dyn CustomerService,
    revalidator: &dyn Revalidator,
    form: &FormData,
) -> MutationResult {
    let input = validate(form, "Create")?;

    let id = store.insert(input).await.map_err(|e| {
        tracing::warn!("failed to create customer: {:#}", e);
        MutationError::persistence("Create", ENTITY)
    })?;

    tracing::info!(customer_id = %id, "customer created");
    revalidator.revalidate_path(CUSTOMERS_PATH);
    Ok(Mutation::redirect(id, CUSTOMERS_PATH))
}

/// Validate the form and rewrite name, email and image of customer `id`
pub async fn update_customer(
    store: &dyn CustomerService,
    revalidator: &dyn Revalidator,
    id: &str,
    form: &FormData,
) -> MutationResult {
    let input = validate(form, "Update")?;

    let affected = store.update(id, input).await.map_err(|e| {
        tracing::warn!(customer_id = %id, "failed to update customer: {:#}", e);
        MutationError::persistence("Update", ENTITY)
    })?;

    if affected == 0 {
        tracing::debug!(customer_id = %id, "update matched no customer");
    } else {
        tracing::info!(customer_id = %id, "customer updated");
    }
    // invoice rows show the customer's name, email and avatar
    revalidator.revalidate_path(CUSTOMERS_PATH);
    revalidator.revalidate_path(INVOICES_PATH);
    Ok(Mutation::redirect(id, CUSTOMERS_PATH))
}

/// Delete customer `id`; the caller stays on the current page
///
/// Fails when invoices still reference the customer.
pub async fn delete_customer(
    store: &dyn CustomerService,
    revalidator: &dyn Revalidator,
    id: &str,
) -> MutationResult {
    let affected = store.delete(id).await.map_err(|e| {
        tracing::warn!(customer_id = %id, "failed to delete customer: {:#}", e);
        MutationError::persistence("Delete", ENTITY)
    })?;

    tracing::info!(customer_id = %id, affected, "customer deleted");
    revalidator.revalidate_path(CUSTOMERS_PATH);
    Ok(Mutation::stay(id, "Deleted Customer"))
}
