//! Dashboard entities: invoices and the customers they bill

pub mod customer;
pub mod invoice;

pub use customer::{AVATAR_IMAGES, CUSTOMER_SCHEMA, Customer, CustomerField, CustomerInput, CustomerRow};
pub use invoice::{
    INVOICE_SCHEMA, Invoice, InvoiceChanges, InvoiceInput, InvoiceRow, InvoiceStatus, NewInvoice,
};
