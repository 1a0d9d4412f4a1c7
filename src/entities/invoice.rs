//! Invoice model and form schema

use crate::core::validation::{FormSchema, filters, validators};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const FIELD_CUSTOMER_ID: &str = "customerId";
pub const FIELD_AMOUNT: &str = "amount";
pub const FIELD_STATUS: &str = "status";

pub const MSG_SELECT_CUSTOMER: &str = "Please select a customer.";
pub const MSG_AMOUNT_POSITIVE: &str = "Please enter an amount greater than $0.";
pub const MSG_SELECT_STATUS: &str = "Please select an invoice status.";

/// Largest amount accepted on the form, in cents
pub const MAX_AMOUNT_CENTS: i64 = i32::MAX as i64;

/// Payment state of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];
    pub const NAMES: &'static [&'static str] = &["pending", "paid"];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(anyhow::anyhow!("unknown invoice status: {}", other)),
        }
    }
}

/// A stored invoice; `amount` is in cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Row to insert; the id is assigned by storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Columns rewritten by an invoice update (the date is never touched)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// Validated invoice form, amount still in dollars
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceInput {
    pub customer_id: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl InvoiceInput {
    /// Dollars to integer cents
    pub fn amount_in_cents(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }

    pub fn into_new(self, date: NaiveDate) -> NewInvoice {
        NewInvoice {
            amount: self.amount_in_cents(),
            customer_id: self.customer_id,
            status: self.status,
            date,
        }
    }

    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            amount: self.amount_in_cents(),
            customer_id: self.customer_id,
            status: self.status,
        }
    }
}

/// Invoice joined with its customer, as shown in the listing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct InvoiceRow {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: String,
    pub date: NaiveDate,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Invoice form schema shared by create and update
pub static INVOICE_SCHEMA: LazyLock<FormSchema> = LazyLock::new(|| {
    let mut schema = FormSchema::new("invoice");

    schema.add_validator(FIELD_CUSTOMER_ID, validators::required(MSG_SELECT_CUSTOMER));

    schema.add_filter(FIELD_AMOUNT, filters::to_number());
    schema.add_validator(FIELD_AMOUNT, validators::cents_in_range(MAX_AMOUNT_CENTS, MSG_AMOUNT_POSITIVE));

    schema.add_validator(
        FIELD_STATUS,
        validators::in_list(InvoiceStatus::NAMES, MSG_SELECT_STATUS),
    );

    schema
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::FormData;

    fn form(customer: &str, amount: &str, status: &str) -> FormData {
        FormData::from_pairs([
            (FIELD_CUSTOMER_ID, customer),
            (FIELD_AMOUNT, amount),
            (FIELD_STATUS, status),
        ])
    }

    #[test]
    fn test_valid_invoice_form() {
        let input: InvoiceInput = INVOICE_SCHEMA
            .parse(&form("c1", "19.99", "pending"))
            .expect("should validate");
        assert_eq!(input.customer_id, "c1");
        assert_eq!(input.status, InvoiceStatus::Pending);
        assert_eq!(input.amount_in_cents(), 1999);
    }

    #[test]
    fn test_amount_zero_and_negative_rejected() {
        for amount in ["0", "-5", "", "abc"] {
            let errors = INVOICE_SCHEMA
                .parse::<InvoiceInput>(&form("c1", amount, "paid"))
                .unwrap_err();
            assert_eq!(errors.get(FIELD_AMOUNT), [MSG_AMOUNT_POSITIVE], "amount {amount:?}");
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn test_amount_outside_cent_range_rejected() {
        for amount in ["0.001", "0.004", "21474836.48", "1e30"] {
            let errors = INVOICE_SCHEMA
                .parse::<InvoiceInput>(&form("c1", amount, "paid"))
                .unwrap_err();
            assert_eq!(errors.get(FIELD_AMOUNT), [MSG_AMOUNT_POSITIVE], "amount {amount:?}");
        }

        let input: InvoiceInput = INVOICE_SCHEMA
            .parse(&form("c1", "21474836.47", "paid"))
            .expect("largest amount should validate");
        assert_eq!(input.amount_in_cents(), MAX_AMOUNT_CENTS);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let errors = INVOICE_SCHEMA
            .parse::<InvoiceInput>(&form("c1", "10", "archived"))
            .unwrap_err();
        assert_eq!(errors.get(FIELD_STATUS), [MSG_SELECT_STATUS]);
    }

    #[test]
    fn test_empty_customer_rejected() {
        let errors = INVOICE_SCHEMA
            .parse::<InvoiceInput>(&form("", "10", "paid"))
            .unwrap_err();
        assert_eq!(errors.get(FIELD_CUSTOMER_ID), [MSG_SELECT_CUSTOMER]);
        assert!(!errors.contains(FIELD_AMOUNT));
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let errors = INVOICE_SCHEMA
            .parse::<InvoiceInput>(&FormData::new())
            .unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_cents_rounding() {
        let input = InvoiceInput {
            customer_id: "c1".into(),
            amount: 0.29,
            status: InvoiceStatus::Paid,
        };
        // 0.29 * 100 is 28.999999999999996 in binary floating point
        assert_eq!(input.amount_in_cents(), 29);
    }

    #[test]
    fn test_status_round_trip_through_str() {
        for status in InvoiceStatus::ALL {
            assert_eq!(status.as_str().parse::<InvoiceStatus>().unwrap(), status);
        }
        assert!("archived".parse::<InvoiceStatus>().is_err());
    }
}
