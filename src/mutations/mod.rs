//! Form mutations
//!
//! Every mutation follows the same pipeline: validate the raw form against its
//! schema, run one statement through the storage port, notify the revalidator,
//! and return a [`Mutation`](crate::core::Mutation) telling the caller where to
//! go. Failures come back as [`MutationError`](crate::core::MutationError).

pub mod customers;
pub mod invoices;

pub use customers::{create_customer, delete_customer, update_customer};
pub use invoices::{create_invoice, delete_invoice, update_invoice};

use chrono::{NaiveDate, Utc};

/// Submission date stamped on new invoices
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
