//! Storage ports for invoices and customers
//!
//! Mutations and pages only ever see these traits; the backing store
//! (in-memory, PostgreSQL) is injected at startup. Every write is a single
//! statement. Write methods report the number of affected rows so callers can
//! log no-op updates and deletes.

use crate::entities::{
    Customer, CustomerField, CustomerInput, CustomerRow, Invoice, InvoiceChanges, InvoiceRow,
    NewInvoice,
};
use anyhow::Result;
use async_trait::async_trait;

/// One page of a listing, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub per_page: u32,
}

impl Page {
    pub fn new(number: u32, per_page: u32) -> Self {
        Self {
            number: number.max(1),
            per_page: per_page.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.per_page)
    }

    /// Number of pages needed for `total` rows (at least one)
    pub fn total_pages(total: u64, per_page: u32) -> u32 {
        let per_page = u64::from(per_page.max(1));
        total.div_ceil(per_page).max(1) as u32
    }
}

/// Service trait for invoice storage
#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// Insert an invoice and return its storage-assigned id
    async fn insert(&self, invoice: NewInvoice) -> Result<String>;

    /// Rewrite customer, amount and status of one invoice
    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64>;

    /// Delete one invoice
    async fn delete(&self, id: &str) -> Result<u64>;

    /// Get an invoice by id
    async fn get(&self, id: &str) -> Result<Option<Invoice>>;

    /// Invoices joined with their customer, filtered by `query`, newest first
    async fn search(&self, query: &str, page: Page) -> Result<Vec<InvoiceRow>>;

    /// Number of invoices matching `query`
    async fn count(&self, query: &str) -> Result<u64>;
}

/// Service trait for customer storage
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Insert a customer and return its storage-assigned id
    async fn insert(&self, customer: CustomerInput) -> Result<String>;

    /// Rewrite name, email and image of one customer
    async fn update(&self, id: &str, customer: CustomerInput) -> Result<u64>;

    /// Delete one customer
    async fn delete(&self, id: &str) -> Result<u64>;

    /// Get a customer by id
    async fn get(&self, id: &str) -> Result<Option<Customer>>;

    /// All customers as id/name pairs ordered by name
    async fn list(&self) -> Result<Vec<CustomerField>>;

    /// Customers with invoice totals, filtered by `query`, ordered by name
    async fn search(&self, query: &str) -> Result<Vec<CustomerRow>>;
}
