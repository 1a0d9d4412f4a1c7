//! # Invoice Dashboard
//!
//! A server-rendered admin dashboard for invoices and the customers they bill.
//!
//! ## Features
//!
//! - **Validated Form Mutations**: create/update/delete for invoices and customers,
//!   each validating its form against a schema before touching storage
//! - **Structured Results**: every mutation returns a `Mutation` (redirect or stay)
//!   or a `MutationError` carrying per-field messages and a summary
//! - **Pluggable Storage**: `InvoiceService`/`CustomerService` ports with in-memory
//!   and PostgreSQL backends
//! - **Page Cache Revalidation**: rendered listings are dropped after each write
//! - **Credentials Sign-In**: session held in an encrypted cookie
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let store = InMemoryStore::new();
//! let cache = PageCache::new();
//!
//! let form = FormData::from_pairs([
//!     ("customerId", customer_id.as_str()),
//!     ("amount", "19.99"),
//!     ("status", "pending"),
//! ]);
//!
//! match create_invoice(&store, &cache, &form).await {
//!     Ok(done) => println!("created {}", done.id),
//!     Err(err) => println!("{}: {}", err.message(), err.field_errors().map(|e| e.to_string()).unwrap_or_default()),
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod mutations;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{
            Credentials, IdentityProvider, Session, SignIn, StaticCredentialsProvider,
            UserAccount, authenticate,
        },
        error::{AuthError, ConfigError, DashboardError, DashboardResult, MutationError},
        mutation::{Mutation, MutationResult, Navigation},
        revalidate::{CUSTOMERS_PATH, INVOICES_PATH, PageCache, Revalidator},
        service::{CustomerService, InvoiceService, Page},
        validation::{FieldErrors, FormData, FormSchema},
    };

    // === Entities ===
    pub use crate::entities::{
        AVATAR_IMAGES, CUSTOMER_SCHEMA, Customer, CustomerField, CustomerInput, CustomerRow,
        INVOICE_SCHEMA, Invoice, InvoiceChanges, InvoiceInput, InvoiceRow, InvoiceStatus,
        NewInvoice,
    };

    // === Mutations ===
    pub use crate::mutations::{
        create_customer, create_invoice, delete_customer, delete_invoice, update_customer,
        update_invoice,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryStore, seed_demo_data};
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::{DashboardConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{AppState, DashboardBuilder, RequireSession};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
