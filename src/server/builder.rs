//! DashboardBuilder for assembling and serving the application

use super::host::AppState;
use super::pages::Pages;
use super::router::build_router;
use crate::config::DashboardConfig;
use crate::core::auth::{IdentityProvider, StaticCredentialsProvider};
use crate::core::revalidate::PageCache;
use crate::core::service::{CustomerService, InvoiceService};
use anyhow::{Result, anyhow};
use axum::Router;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the dashboard router
///
/// # Example
///
/// ```ignore
/// let store = InMemoryStore::new();
/// let app = DashboardBuilder::new()
///     .with_store(store)
///     .with_config(&config)?
///     .build()?;
/// ```
pub struct DashboardBuilder {
    invoices: Option<Arc<dyn InvoiceService>>,
    customers: Option<Arc<dyn CustomerService>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    cache: PageCache,
    cookie_key: Option<Key>,
    secure_cookies: bool,
    items_per_page: u32,
}

impl DashboardBuilder {
    pub fn new() -> Self {
        Self {
            invoices: None,
            customers: None,
            identity: None,
            cache: PageCache::new(),
            cookie_key: None,
            secure_cookies: false,
            items_per_page: 6,
        }
    }

    /// Use one store for both invoices and customers
    pub fn with_store<S>(mut self, store: S) -> Self
    where
        S: InvoiceService + CustomerService + 'static,
    {
        let store = Arc::new(store);
        self.invoices = Some(store.clone());
        self.customers = Some(store);
        self
    }

    pub fn with_invoice_service(mut self, service: Arc<dyn InvoiceService>) -> Self {
        self.invoices = Some(service);
        self
    }

    pub fn with_customer_service(mut self, service: Arc<dyn CustomerService>) -> Self {
        self.customers = Some(service);
        self
    }

    pub fn with_identity_provider(mut self, provider: impl IdentityProvider + 'static) -> Self {
        self.identity = Some(Arc::new(provider));
        self
    }

    /// Share a page cache (tests inspect it)
    pub fn with_cache(mut self, cache: PageCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_cookie_key(mut self, key: Key) -> Self {
        self.cookie_key = Some(key);
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: u32) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    /// Apply the auth, listing and cookie settings of a configuration
    ///
    /// A missing or short session secret leaves the key unset; `build` then
    /// generates a random one.
    pub fn with_config(mut self, config: &DashboardConfig) -> Result<Self> {
        self.identity = Some(Arc::new(StaticCredentialsProvider::new(
            config.auth.users.clone(),
        )));
        self.items_per_page = config.listing.items_per_page;
        self.secure_cookies = config.server.secure_cookies;

        if let Some(secret) = config.session_secret() {
            let key = Key::try_from(secret)
                .map_err(|e| anyhow!("Invalid session secret: {}", e))?;
            self.cookie_key = Some(key);
        }
        Ok(self)
    }

    /// Assemble the shared handler state
    pub fn build_state(self) -> Result<AppState> {
        let invoices = self
            .invoices
            .ok_or_else(|| anyhow!("InvoiceService is required. Call .with_store()"))?;
        let customers = self
            .customers
            .ok_or_else(|| anyhow!("CustomerService is required. Call .with_store()"))?;
        let identity = self.identity.ok_or_else(|| {
            anyhow!("IdentityProvider is required. Call .with_identity_provider() or .with_config()")
        })?;

        let cookie_key = self.cookie_key.unwrap_or_else(|| {
            tracing::warn!("no usable session secret configured, generated a random cookie key; sessions will not survive a restart");
            Key::generate()
        });

        let pages = Pages::new().map_err(|e| anyhow!("Failed to compile templates: {}", e))?;

        Ok(AppState {
            invoices,
            customers,
            identity,
            cache: self.cache,
            pages: Arc::new(pages),
            cookie_key,
            secure_cookies: self.secure_cookies,
            items_per_page: self.items_per_page.max(1),
        })
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        Ok(build_router(self.build_state()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[test]
    fn test_build_without_store_fails() {
        let err = DashboardBuilder::new()
            .with_config(&DashboardConfig::default())
            .unwrap()
            .build_state()
            .unwrap_err();
        assert!(err.to_string().contains("InvoiceService is required"));
    }

    #[test]
    fn test_build_without_identity_fails() {
        let err = DashboardBuilder::new()
            .with_store(InMemoryStore::new())
            .build_state()
            .unwrap_err();
        assert!(err.to_string().contains("IdentityProvider is required"));
    }

    #[test]
    fn test_config_applies_listing_and_secret() {
        let mut config = DashboardConfig::default();
        config.listing.items_per_page = 10;
        config.server.secure_cookies = true;
        config.auth.session_secret = Some("k".repeat(64));

        let state = DashboardBuilder::new()
            .with_store(InMemoryStore::new())
            .with_config(&config)
            .unwrap()
            .build_state()
            .unwrap();

        assert_eq!(state.items_per_page, 10);
        assert!(state.secure_cookies);
        assert_eq!(
            state.cookie_key.master(),
            Key::try_from("k".repeat(64).as_bytes()).unwrap().master()
        );
    }

    #[test]
    fn test_build_router() {
        let router = DashboardBuilder::new()
            .with_store(InMemoryStore::new())
            .with_config(&DashboardConfig::default())
            .unwrap()
            .build();
        assert!(router.is_ok());
    }
}
