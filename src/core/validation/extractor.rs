//! Axum extractor for raw form submissions
//!
//! HTML forms post `application/x-www-form-urlencoded` bodies. [`FormData`]
//! keeps every field as the raw string it was submitted as; coercion and
//! validation are left to a [`FormSchema`](super::FormSchema).

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;

/// Raw string fields of a submitted form
///
/// When a field is repeated, the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormData(IndexMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = IndexMap::new();
        for (key, value) in pairs {
            fields.entry(key.into()).or_insert_with(|| value.into());
        }
        Self(fields)
    }

    /// Get a field's raw value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<Vec<(String, String)>>::from_request(req, state).await {
            Ok(Form(pairs)) => Ok(FormData::from_pairs(pairs)),
            Err(e) => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "code": "INVALID_FORM",
                    "message": "Invalid form submission",
                    "details": e.body_text()
                })),
            )
                .into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_first_occurrence_wins() {
        let form = FormData::from_pairs([("status", "paid"), ("status", "pending")]);
        assert_eq!(form.get("status"), Some("paid"));
    }

    #[test]
    fn test_missing_field_is_none() {
        let form = FormData::from_pairs([("amount", "10")]);
        assert_eq!(form.get("customerId"), None);
    }

    #[test]
    fn test_set_replaces_value() {
        let mut form = FormData::new();
        form.set("amount", "1");
        form.set("amount", "2");
        assert_eq!(form.get("amount"), Some("2"));
    }

    #[tokio::test]
    async fn test_extracts_urlencoded_body() {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("customerId=c1&amount=19.99&status=pending"))
            .expect("failed to build request");

        let form = FormData::from_request(req, &()).await.expect("should extract");
        assert_eq!(form.get("customerId"), Some("c1"));
        assert_eq!(form.get("amount"), Some("19.99"));
        assert_eq!(form.get("status"), Some("pending"));
    }

    #[tokio::test]
    async fn test_rejects_wrong_content_type() {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .expect("failed to build request");

        let rejection = FormData::from_request(req, &()).await.unwrap_err();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }
}
