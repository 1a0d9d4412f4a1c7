//! In-memory implementation of the storage ports for testing and development

use crate::core::service::{CustomerService, InvoiceService, Page};
use crate::entities::{
    Customer, CustomerField, CustomerInput, CustomerRow, Invoice, InvoiceChanges, InvoiceRow,
    InvoiceStatus, NewInvoice,
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    customers: IndexMap<String, Customer>,
    invoices: IndexMap<String, Invoice>,
}

impl Tables {
    fn check_customer(&self, customer_id: &str) -> Result<()> {
        if self.customers.contains_key(customer_id) {
            Ok(())
        } else {
            Err(anyhow!(
                "insert or update on table \"invoices\" violates foreign key constraint: customer '{}' does not exist",
                customer_id
            ))
        }
    }

    fn invoice_row(&self, invoice: &Invoice) -> InvoiceRow {
        let customer = self.customers.get(&invoice.customer_id);
        InvoiceRow {
            id: invoice.id.clone(),
            customer_id: invoice.customer_id.clone(),
            amount: invoice.amount,
            status: invoice.status.as_str().to_string(),
            date: invoice.date,
            name: customer.map(|c| c.name.clone()).unwrap_or_default(),
            email: customer.map(|c| c.email.clone()).unwrap_or_default(),
            image_url: customer.map(|c| c.image_url.clone()).unwrap_or_default(),
        }
    }
}

/// In-memory store implementing both [`InvoiceService`] and [`CustomerService`]
///
/// Uses one RwLock over both tables so that the customer foreign key is
/// checked under the same guard as the write. Ids are random UUIDs.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> Result<T>) -> Result<T> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        f(&tables)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Tables) -> Result<T>) -> Result<T> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        f(&mut tables)
    }
}

/// Case-insensitive substring match
fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn invoice_matches(row: &InvoiceRow, needle: &str) -> bool {
    needle.is_empty()
        || contains_ci(&row.name, needle)
        || contains_ci(&row.email, needle)
        || row.amount.to_string().contains(needle)
        || row.date.to_string().contains(needle)
        || contains_ci(&row.status, needle)
}

#[async_trait]
impl InvoiceService for InMemoryStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<String> {
        self.write(|tables| {
            tables.check_customer(&invoice.customer_id)?;

            let id = Uuid::new_v4().to_string();
            tables.invoices.insert(
                id.clone(),
                Invoice {
                    id: id.clone(),
                    customer_id: invoice.customer_id,
                    amount: invoice.amount,
                    status: invoice.status,
                    date: invoice.date,
                },
            );
            Ok(id)
        })
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64> {
        self.write(|tables| {
            if !tables.invoices.contains_key(id) {
                return Ok(0);
            }
            tables.check_customer(&changes.customer_id)?;

            if let Some(invoice) = tables.invoices.get_mut(id) {
                invoice.customer_id = changes.customer_id;
                invoice.amount = changes.amount;
                invoice.status = changes.status;
            }
            Ok(1)
        })
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        self.write(|tables| Ok(tables.invoices.shift_remove(id).map_or(0, |_| 1)))
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>> {
        self.read(|tables| Ok(tables.invoices.get(id).cloned()))
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<InvoiceRow>> {
        let needle = query.trim().to_lowercase();
        self.read(|tables| {
            let mut rows: Vec<InvoiceRow> = tables
                .invoices
                .values()
                .map(|invoice| tables.invoice_row(invoice))
                .filter(|row| invoice_matches(row, &needle))
                .collect();

            rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

            Ok(rows
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.per_page as usize)
                .collect())
        })
    }

    async fn count(&self, query: &str) -> Result<u64> {
        let needle = query.trim().to_lowercase();
        self.read(|tables| {
            Ok(tables
                .invoices
                .values()
                .filter(|invoice| invoice_matches(&tables.invoice_row(invoice), &needle))
                .count() as u64)
        })
    }
}

#[async_trait]
impl CustomerService for InMemoryStore {
    async fn insert(&self, customer: CustomerInput) -> Result<String> {
        self.write(|tables| {
            let id = Uuid::new_v4().to_string();
            tables.customers.insert(
                id.clone(),
                Customer {
                    id: id.clone(),
                    name: customer.name,
                    email: customer.email,
                    image_url: customer.image_url,
                },
            );
            Ok(id)
        })
    }

    async fn update(&self, id: &str, customer: CustomerInput) -> Result<u64> {
        self.write(|tables| match tables.customers.get_mut(id) {
            Some(existing) => {
                existing.name = customer.name;
                existing.email = customer.email;
                existing.image_url = customer.image_url;
                Ok(1)
            }
            None => Ok(0),
        })
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        self.write(|tables| {
            if tables.invoices.values().any(|i| i.customer_id == id) {
                return Err(anyhow!(
                    "update or delete on table \"customers\" violates foreign key constraint: customer '{}' still has invoices",
                    id
                ));
            }
            Ok(tables.customers.shift_remove(id).map_or(0, |_| 1))
        })
    }

    async fn get(&self, id: &str) -> Result<Option<Customer>> {
        self.read(|tables| Ok(tables.customers.get(id).cloned()))
    }

    async fn list(&self) -> Result<Vec<CustomerField>> {
        self.read(|tables| {
            let mut fields: Vec<CustomerField> = tables
                .customers
                .values()
                .map(|c| CustomerField {
                    id: c.id.clone(),
                    name: c.name.clone(),
                })
                .collect();
            fields.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(fields)
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<CustomerRow>> {
        let needle = query.trim().to_lowercase();
        self.read(|tables| {
            let mut rows: Vec<CustomerRow> = tables
                .customers
                .values()
                .filter(|c| {
                    needle.is_empty()
                        || contains_ci(&c.name, &needle)
                        || contains_ci(&c.email, &needle)
                })
                .map(|c| {
                    let invoices = tables.invoices.values().filter(|i| i.customer_id == c.id);
                    let (mut total_invoices, mut total_pending, mut total_paid) = (0i64, 0i64, 0i64);
                    for invoice in invoices {
                        total_invoices += 1;
                        match invoice.status {
                            InvoiceStatus::Pending => {
                                total_pending = i64::saturating_add(total_pending, invoice.amount)
                            }
                            InvoiceStatus::Paid => {
                                total_paid = i64::saturating_add(total_paid, invoice.amount)
                            }
                        }
                    }
                    CustomerRow {
                        id: c.id.clone(),
                        name: c.name.clone(),
                        email: c.email.clone(),
                        image_url: c.image_url.clone(),
                        total_invoices,
                        total_pending,
                        total_paid,
                    }
                })
                .collect();
            rows.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(rows)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn customer(name: &str) -> CustomerInput {
        CustomerInput {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            image_url: "/customers/amy-burns.png".to_string(),
        }
    }

    fn invoice(customer_id: &str, amount: i64, status: InvoiceStatus, day: u32) -> NewInvoice {
        NewInvoice {
            customer_id: customer_id.to_string(),
            amount,
            status,
            date: date(day),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_invoice() {
        let store = InMemoryStore::new();
        let cid = CustomerService::insert(&store, customer("Amy")).await.unwrap();
        let id = InvoiceService::insert(&store, invoice(&cid, 1999, InvoiceStatus::Pending, 1))
            .await
            .unwrap();

        let stored = InvoiceService::get(&store, &id).await.unwrap().unwrap();
        assert_eq!(stored.amount, 1999);
        assert_eq!(stored.customer_id, cid);
        assert_eq!(stored.date, date(1));
    }

    #[tokio::test]
    async fn test_insert_invoice_unknown_customer_fails() {
        let store = InMemoryStore::new();
        let result =
            InvoiceService::insert(&store, invoice("missing", 100, InvoiceStatus::Paid, 1)).await;
        assert!(result.unwrap_err().to_string().contains("foreign key"));
        assert_eq!(InvoiceService::count(&store, "").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_date() {
        let store = InMemoryStore::new();
        let a = CustomerService::insert(&store, customer("Amy")).await.unwrap();
        let b = CustomerService::insert(&store, customer("Bob")).await.unwrap();
        let id = InvoiceService::insert(&store, invoice(&a, 100, InvoiceStatus::Pending, 3))
            .await
            .unwrap();

        let changes = InvoiceChanges {
            customer_id: b.clone(),
            amount: 250,
            status: InvoiceStatus::Paid,
        };
        assert_eq!(InvoiceService::update(&store, &id, changes).await.unwrap(), 1);

        let stored = InvoiceService::get(&store, &id).await.unwrap().unwrap();
        assert_eq!(stored.customer_id, b);
        assert_eq!(stored.amount, 250);
        assert_eq!(stored.status, InvoiceStatus::Paid);
        assert_eq!(stored.date, date(3));
    }

    #[tokio::test]
    async fn test_update_missing_invoice_affects_nothing() {
        let store = InMemoryStore::new();
        let changes = InvoiceChanges {
            customer_id: "x".into(),
            amount: 1,
            status: InvoiceStatus::Paid,
        };
        assert_eq!(InvoiceService::update(&store, "nope", changes).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_invoice_counts() {
        let store = InMemoryStore::new();
        let cid = CustomerService::insert(&store, customer("Amy")).await.unwrap();
        let id = InvoiceService::insert(&store, invoice(&cid, 100, InvoiceStatus::Paid, 1))
            .await
            .unwrap();

        assert_eq!(InvoiceService::delete(&store, &id).await.unwrap(), 1);
        assert_eq!(InvoiceService::delete(&store, &id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_referenced_customer_fails() {
        let store = InMemoryStore::new();
        let cid = CustomerService::insert(&store, customer("Amy")).await.unwrap();
        InvoiceService::insert(&store, invoice(&cid, 100, InvoiceStatus::Paid, 1))
            .await
            .unwrap();

        assert!(CustomerService::delete(&store, &cid).await.is_err());
        assert!(CustomerService::get(&store, &cid).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_search_filters_sorts_and_paginates() {
        let store = InMemoryStore::new();
        let amy = CustomerService::insert(&store, customer("Amy")).await.unwrap();
        let bob = CustomerService::insert(&store, customer("Bob")).await.unwrap();
        for day in 1..=5 {
            InvoiceService::insert(&store, invoice(&amy, 100 * day as i64, InvoiceStatus::Pending, day))
                .await
                .unwrap();
        }
        InvoiceService::insert(&store, invoice(&bob, 999, InvoiceStatus::Paid, 9))
            .await
            .unwrap();

        let first = InvoiceService::search(&store, "", Page::new(1, 4)).await.unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first[0].name, "Bob");
        assert_eq!(first[1].date, date(5));

        let second = InvoiceService::search(&store, "", Page::new(2, 4)).await.unwrap();
        assert_eq!(second.len(), 2);

        let amy_rows = InvoiceService::search(&store, "AMY", Page::new(1, 10)).await.unwrap();
        assert_eq!(amy_rows.len(), 5);
        assert_eq!(InvoiceService::count(&store, "amy").await.unwrap(), 5);
        assert_eq!(InvoiceService::count(&store, "paid").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_customer_search_totals() {
        let store = InMemoryStore::new();
        let amy = CustomerService::insert(&store, customer("Amy")).await.unwrap();
        CustomerService::insert(&store, customer("Bob")).await.unwrap();
        InvoiceService::insert(&store, invoice(&amy, 100, InvoiceStatus::Pending, 1))
            .await
            .unwrap();
        InvoiceService::insert(&store, invoice(&amy, 250, InvoiceStatus::Paid, 2))
            .await
            .unwrap();

        let rows = CustomerService::search(&store, "").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Amy");
        assert_eq!(rows[0].total_invoices, 2);
        assert_eq!(rows[0].total_pending, 100);
        assert_eq!(rows[0].total_paid, 250);
        assert_eq!(rows[1].total_invoices, 0);

        let bobs = CustomerService::search(&store, "bob@").await.unwrap();
        assert_eq!(bobs.len(), 1);
    }

    #[tokio::test]
    async fn test_customer_totals_saturate_instead_of_overflowing() {
        let store = InMemoryStore::new();
        let amy = CustomerService::insert(&store, customer("Amy")).await.unwrap();
        for day in [1, 2] {
            InvoiceService::insert(&store, invoice(&amy, i64::MAX, InvoiceStatus::Paid, day))
                .await
                .unwrap();
        }

        let rows = CustomerService::search(&store, "").await.unwrap();
        assert_eq!(rows[0].total_invoices, 2);
        assert_eq!(rows[0].total_paid, i64::MAX);
    }

    #[tokio::test]
    async fn test_list_customers_sorted_by_name() {
        let store = InMemoryStore::new();
        CustomerService::insert(&store, customer("Zed")).await.unwrap();
        CustomerService::insert(&store, customer("Amy")).await.unwrap();
        let names: Vec<String> = CustomerService::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
    }
}
