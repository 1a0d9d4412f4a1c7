//! Validation and filtering system
//!
//! Forms are validated declaratively: a [`FormSchema`] applies filters (trim,
//! numeric coercion) and validators to the raw fields of a [`FormData`], and
//! produces either a typed record or a [`FieldErrors`] map.

pub mod config;
pub mod extractor;
pub mod filters;
pub mod validators;

pub use config::{FieldErrors, FormSchema};
pub use extractor::FormData;
