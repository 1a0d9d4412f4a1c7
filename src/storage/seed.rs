//! Demo data for development stores

use crate::core::service::{CustomerService, InvoiceService};
use crate::entities::{CustomerInput, InvoiceStatus, NewInvoice};
use anyhow::{Context, Result};
use chrono::NaiveDate;

const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Evil Rabbit", "evil@rabbit.com", "/customers/evil-rabbit.png"),
    ("Delba de Oliveira", "delba@oliveira.com", "/customers/delba-de-oliveira.png"),
    ("Lee Robinson", "lee@robinson.com", "/customers/lee-robinson.png"),
    ("Michael Novotny", "michael@novotny.com", "/customers/michael-novotny.png"),
    ("Amy Burns", "amy@burns.com", "/customers/amy-burns.png"),
    ("Balazs Orban", "balazs@orban.com", "/customers/balazs-orban.png"),
];

/// (customer index, amount in cents, status, date)
const INVOICES: &[(usize, i64, InvoiceStatus, &str)] = &[
    (0, 15795, InvoiceStatus::Pending, "2022-12-06"),
    (1, 20348, InvoiceStatus::Pending, "2022-11-14"),
    (4, 3040, InvoiceStatus::Paid, "2022-10-29"),
    (3, 44800, InvoiceStatus::Paid, "2023-09-10"),
    (5, 34577, InvoiceStatus::Pending, "2023-08-05"),
    (2, 54246, InvoiceStatus::Pending, "2023-07-16"),
    (0, 666, InvoiceStatus::Pending, "2023-06-27"),
    (3, 32545, InvoiceStatus::Paid, "2023-06-09"),
    (4, 1250, InvoiceStatus::Paid, "2023-06-17"),
    (5, 8546, InvoiceStatus::Paid, "2023-06-07"),
    (1, 500, InvoiceStatus::Paid, "2023-08-19"),
    (5, 8945, InvoiceStatus::Paid, "2023-06-03"),
    (2, 1000, InvoiceStatus::Paid, "2022-06-05"),
];

/// Insert the demo customers and their invoices through the storage ports
pub async fn seed_demo_data(
    customers: &dyn CustomerService,
    invoices: &dyn InvoiceService,
) -> Result<()> {
    let mut ids = Vec::with_capacity(CUSTOMERS.len());
    for (name, email, image_url) in CUSTOMERS {
        let id = customers
            .insert(CustomerInput {
                name: name.to_string(),
                email: email.to_string(),
                image_url: image_url.to_string(),
            })
            .await
            .with_context(|| format!("seeding customer {}", name))?;
        ids.push(id);
    }

    for (index, amount, status, date) in INVOICES {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid seed date {}", date))?;
        let customer_id = ids
            .get(*index)
            .cloned()
            .context("seed invoice references unknown customer")?;
        invoices
            .insert(NewInvoice {
                customer_id,
                amount: *amount,
                status: *status,
                date,
            })
            .await
            .context("seeding invoice")?;
    }

    tracing::info!(
        customers = CUSTOMERS.len(),
        invoices = INVOICES.len(),
        "seeded demo data"
    );
    Ok(())
}
