//! Shared test harness for mutation and HTTP tests
//!
//! Provides a [`RecordingRevalidator`], a [`SpyStore`] that counts storage
//! calls and can be switched into failure mode, and form/fixture helpers.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod dashboard_harness;
//! use dashboard_harness::*;
//! ```

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use dashboard::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// RecordingRevalidator
// ---------------------------------------------------------------------------

/// Revalidator that remembers every path it was asked to revalidate
#[derive(Clone, Default)]
pub struct RecordingRevalidator {
    paths: Arc<Mutex<Vec<String>>>,
}

impl RecordingRevalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Revalidator for RecordingRevalidator {
    fn revalidate_path(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

// ---------------------------------------------------------------------------
// SpyStore
// ---------------------------------------------------------------------------

/// In-memory store that counts write calls and can be made to fail
#[derive(Clone, Default)]
pub struct SpyStore {
    pub inner: InMemoryStore,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl SpyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of insert/update/delete calls that reached the store
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail like a lost database connection
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(anyhow!("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl InvoiceService for SpyStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<String> {
        self.write()?;
        InvoiceService::insert(&self.inner, invoice).await
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64> {
        self.write()?;
        InvoiceService::update(&self.inner, id, changes).await
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        self.write()?;
        InvoiceService::delete(&self.inner, id).await
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>> {
        self.check()?;
        InvoiceService::get(&self.inner, id).await
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<InvoiceRow>> {
        self.check()?;
        InvoiceService::search(&self.inner, query, page).await
    }

    async fn count(&self, query: &str) -> Result<u64> {
        self.check()?;
        InvoiceService::count(&self.inner, query).await
    }
}

#[async_trait]
impl CustomerService for SpyStore {
    async fn insert(&self, customer: CustomerInput) -> Result<String> {
        self.write()?;
        CustomerService::insert(&self.inner, customer).await
    }

    async fn update(&self, id: &str, customer: CustomerInput) -> Result<u64> {
        self.write()?;
        CustomerService::update(&self.inner, id, customer).await
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        self.write()?;
        CustomerService::delete(&self.inner, id).await
    }

    async fn get(&self, id: &str) -> Result<Option<Customer>> {
        self.check()?;
        CustomerService::get(&self.inner, id).await
    }

    async fn list(&self) -> Result<Vec<CustomerField>> {
        self.check()?;
        CustomerService::list(&self.inner).await
    }

    async fn search(&self, query: &str) -> Result<Vec<CustomerRow>> {
        self.check()?;
        CustomerService::search(&self.inner, query).await
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn invoice_form(customer_id: &str, amount: &str, status: &str) -> FormData {
    FormData::from_pairs([
        ("customerId", customer_id),
        ("amount", amount),
        ("status", status),
    ])
}

pub fn customer_form(name: &str, email: &str, image_url: &str) -> FormData {
    FormData::from_pairs([("name", name), ("email", email), ("image_url", image_url)])
}

/// Insert a customer directly into the store (not counted as a mutation write)
pub async fn seed_customer(store: &InMemoryStore, name: &str) -> String {
    CustomerService::insert(
        store,
        CustomerInput {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            image_url: AVATAR_IMAGES[0].to_string(),
        },
    )
    .await
    .expect("Failed to seed customer")
}

pub fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
