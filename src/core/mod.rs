//! Core traits and types: ports, validation, errors and the mutation contract

pub mod auth;
pub mod error;
pub mod format;
pub mod mutation;
pub mod revalidate;
pub mod service;
pub mod validation;

pub use auth::{IdentityProvider, Session, SignIn};
pub use error::{AuthError, DashboardError, DashboardResult, MutationError};
pub use mutation::{Mutation, MutationResult, Navigation};
pub use revalidate::{PageCache, Revalidator};
pub use service::{CustomerService, InvoiceService, Page};
pub use validation::{FieldErrors, FormData, FormSchema};
