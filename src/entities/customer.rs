//! Customer model and form schema

use crate::core::validation::{FormSchema, filters, validators};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_IMAGE_URL: &str = "image_url";

pub const MSG_NAME: &str = "Please enter your full name.";
pub const MSG_EMAIL: &str = "Please enter a valid email.";
pub const MSG_IMAGE_URL: &str = "Please enter a valid url.";

/// Avatar assets a customer can pick from
pub const AVATAR_IMAGES: &[&str] = &[
    "/customers/amy-burns.png",
    "/customers/balazs-orban.png",
    "/customers/delba-de-oliveira.png",
    "/customers/emil-kowalski.png",
    "/customers/evil-rabbit.png",
    "/customers/guillermo-rauch.png",
    "/customers/hector-simpson.png",
    "/customers/jared-palmer.png",
    "/customers/lee-robinson.png",
    "/customers/michael-novotny.png",
    "/customers/steph-dietz.png",
    "/customers/steven-tey.png",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Validated customer form; used for both inserts and updates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Id and name, for the invoice form's customer dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CustomerField {
    pub id: String,
    pub name: String,
}

/// Customer with invoice aggregates (cents), as shown in the listing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

/// Customer form schema shared by create and update
///
/// Email format and avatar membership are deliberately not checked.
pub static CUSTOMER_SCHEMA: LazyLock<FormSchema> = LazyLock::new(|| {
    let mut schema = FormSchema::new("customer");

    schema.add_filter(FIELD_NAME, filters::trim());
    schema.add_validator(FIELD_NAME, validators::required(MSG_NAME));

    schema.add_filter(FIELD_EMAIL, filters::trim());
    schema.add_validator(FIELD_EMAIL, validators::required(MSG_EMAIL));

    schema.add_validator(FIELD_IMAGE_URL, validators::required(MSG_IMAGE_URL));

    schema
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::FormData;

    #[test]
    fn test_valid_customer_form() {
        let form = FormData::from_pairs([
            (FIELD_NAME, " Amy Burns "),
            (FIELD_EMAIL, "amy@burns.com"),
            (FIELD_IMAGE_URL, AVATAR_IMAGES[0]),
        ]);
        let input: CustomerInput = CUSTOMER_SCHEMA.parse(&form).expect("should validate");
        assert_eq!(input.name, "Amy Burns");
        assert_eq!(input.image_url, "/customers/amy-burns.png");
    }

    #[test]
    fn test_email_format_not_checked() {
        let form = FormData::from_pairs([
            (FIELD_NAME, "Amy"),
            (FIELD_EMAIL, "not-an-email"),
            (FIELD_IMAGE_URL, "/anything.png"),
        ]);
        assert!(CUSTOMER_SCHEMA.parse::<CustomerInput>(&form).is_ok());
    }

    #[test]
    fn test_missing_fields_reported() {
        let form = FormData::from_pairs([(FIELD_NAME, "   ")]);
        let errors = CUSTOMER_SCHEMA.parse::<CustomerInput>(&form).unwrap_err();
        assert_eq!(errors.get(FIELD_NAME), [MSG_NAME]);
        assert_eq!(errors.get(FIELD_EMAIL), [MSG_EMAIL]);
        assert_eq!(errors.get(FIELD_IMAGE_URL), [MSG_IMAGE_URL]);
    }
}
