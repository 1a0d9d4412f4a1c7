//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses hide storage details
//! - Auth outcomes are classified into the two login messages

use axum::http::StatusCode;
use axum::response::IntoResponse;
use dashboard::prelude::*;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_validation_error_returns_422() {
        let err: DashboardError =
            MutationError::validation(FieldErrors::new(), "Create", "Invoice").into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_persistence_error_returns_500() {
        let err: DashboardError = MutationError::persistence("Delete", "Customer").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "PERSISTENCE_ERROR");
    }

    #[test]
    fn test_not_found_returns_404() {
        let err = DashboardError::not_found("invoice", "abc");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "invoice with id 'abc' not found");
    }

    #[test]
    fn test_rejected_sign_in_returns_401() {
        let err: DashboardError = AuthError::CredentialsSignin.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "CredentialsSignin");
    }

    #[test]
    fn test_config_error_returns_500() {
        let err: DashboardError = ConfigError::Invalid {
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}

// =============================================================================
// Error Response Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[test]
    fn test_storage_error_message_is_generic() {
        let err = DashboardError::storage(anyhow::anyhow!("password authentication failed for user"));
        let response = err.to_response();

        assert_eq!(response.code, "STORAGE_ERROR");
        assert_eq!(response.message, "Something went wrong.");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_validation_response_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.add("amount", "Please enter an amount greater than $0.");
        let err: DashboardError = MutationError::validation(errors, "Update", "Invoice").into();

        let response = err.to_response();

        assert_eq!(response.message, "Missing Fields. Failed to Update Invoice.");
        let details = response.details.unwrap();
        assert_eq!(
            details["fields"]["amount"][0],
            "Please enter an amount greater than $0."
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = DashboardError::not_found("customer", "1").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = DashboardError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Authentication Classification Tests
// =============================================================================

mod auth_tests {
    use super::*;

    struct FailingProvider(fn() -> anyhow::Error);

    #[async_trait]
    impl IdentityProvider for FailingProvider {
        async fn sign_in(&self, _credentials: &Credentials) -> Result<Session> {
            Err((self.0)())
        }
    }

    fn login_form(email: &str, password: &str) -> FormData {
        FormData::from_pairs([("email", email), ("password", password)])
    }

    fn accounts() -> StaticCredentialsProvider {
        StaticCredentialsProvider::new(vec![UserAccount {
            email: "user@nextmail.com".to_string(),
            password: "123456".to_string(),
            name: "User".to_string(),
        }])
    }

    #[tokio::test]
    async fn test_valid_credentials_authenticate() {
        let outcome = authenticate(&accounts(), &login_form("user@nextmail.com", "123456"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SignIn::Authenticated(Session {
                email: "user@nextmail.com".to_string(),
                name: "User".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let outcome = authenticate(&accounts(), &login_form("user@nextmail.com", "1234567"))
            .await
            .unwrap();
        assert_eq!(outcome, SignIn::Rejected("Invalid credentials."));
    }

    #[tokio::test]
    async fn test_short_password_never_matches() {
        let outcome = authenticate(&accounts(), &login_form("user@nextmail.com", "12345"))
            .await
            .unwrap();
        assert_eq!(outcome, SignIn::Rejected("Invalid credentials."));
    }

    #[tokio::test]
    async fn test_other_auth_error_is_something_went_wrong() {
        let provider = FailingProvider(|| -> anyhow::Error { AuthError::AccessDenied.into() });
        let outcome = authenticate(&provider, &login_form("user@nextmail.com", "123456"))
            .await
            .unwrap();
        assert_eq!(outcome, SignIn::Rejected("Something went wrong."));
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_something_went_wrong() {
        let provider = StaticCredentialsProvider::new(vec![]);
        let outcome = authenticate(&provider, &login_form("user@nextmail.com", "123456"))
            .await
            .unwrap();
        assert_eq!(outcome, SignIn::Rejected("Something went wrong."));
    }

    #[tokio::test]
    async fn test_non_auth_error_propagates() {
        let provider = FailingProvider(|| anyhow::anyhow!("identity backend unreachable"));
        let err = authenticate(&provider, &login_form("user@nextmail.com", "123456"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "identity backend unreachable");
    }
}
