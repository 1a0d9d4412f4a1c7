//! Application state shared by every handler
//!
//! `AppState` is the single source of truth for a running dashboard: storage
//! ports, the identity provider, the page cache, compiled templates and the
//! cookie key. It is cheap to clone (everything sits behind an `Arc`).

use super::pages::Pages;
use crate::core::auth::IdentityProvider;
use crate::core::revalidate::PageCache;
use crate::core::service::{CustomerService, InvoiceService};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub invoices: Arc<dyn InvoiceService>,
    pub customers: Arc<dyn CustomerService>,
    pub identity: Arc<dyn IdentityProvider>,

    /// Rendered listing pages; also the revalidator handed to mutations
    pub cache: PageCache,

    pub pages: Arc<Pages>,

    /// Key for the private session and flash cookies
    pub cookie_key: Key,

    /// Mark cookies `Secure` (disable for plain-HTTP development)
    pub secure_cookies: bool,

    pub items_per_page: u32,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cached_pages", &self.cache.len())
            .field("secure_cookies", &self.secure_cookies)
            .field("items_per_page", &self.items_per_page)
            .finish_non_exhaustive()
    }
}
