//! Path-keyed cache invalidation
//!
//! Mutations notify a [`Revalidator`] after every successful write. The
//! [`PageCache`] implementation keeps rendered listing pages keyed by request
//! path (query string included) and drops every render under a revalidated path.
//!
//! Every revalidation also bumps a generation counter. A render that started
//! before a revalidation is discarded by [`PageCache::insert_if_fresh`] rather
//! than cached over the newer data.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub const INVOICES_PATH: &str = "/dashboard/invoices";
pub const CUSTOMERS_PATH: &str = "/dashboard/customers";

/// Notification port: mark all cached renders under `path` stale
pub trait Revalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);
}

#[derive(Default)]
struct Pages {
    renders: HashMap<String, String>,
    generation: u64,
}

/// In-process cache of rendered pages
#[derive(Clone, Default)]
pub struct PageCache {
    pages: Arc<RwLock<Pages>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached render for a request path, if still fresh
    pub fn get(&self, key: &str) -> Option<String> {
        match self.pages.read() {
            Ok(pages) => pages.renders.get(key).cloned(),
            Err(e) => {
                tracing::warn!("page cache lock poisoned: {}", e);
                None
            }
        }
    }

    /// Store a render for a request path
    pub fn insert(&self, key: impl Into<String>, html: impl Into<String>) {
        match self.pages.write() {
            Ok(mut pages) => {
                pages.renders.insert(key.into(), html.into());
            }
            Err(e) => tracing::warn!("page cache lock poisoned: {}", e),
        }
    }

    /// Current revalidation count; capture it before reading storage
    pub fn generation(&self) -> u64 {
        self.pages.read().map(|p| p.generation).unwrap_or(0)
    }

    /// Store a render only if nothing was revalidated since `generation`
    ///
    /// Returns whether the render was cached.
    pub fn insert_if_fresh(&self, key: impl Into<String>, html: impl Into<String>, generation: u64) -> bool {
        match self.pages.write() {
            Ok(mut pages) if pages.generation == generation => {
                pages.renders.insert(key.into(), html.into());
                true
            }
            Ok(_) => {
                let key = key.into();
                tracing::debug!(path = %key, "discarding render older than last revalidation");
                false
            }
            Err(e) => {
                tracing::warn!("page cache lock poisoned: {}", e);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pages.read().map(|p| p.renders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `key` is `path` itself or lies under it
fn is_under(key: &str, path: &str) -> bool {
    match key.strip_prefix(path) {
        Some(rest) => rest.is_empty() || rest.starts_with('?') || rest.starts_with('/'),
        None => false,
    }
}

impl Revalidator for PageCache {
    fn revalidate_path(&self, path: &str) {
        match self.pages.write() {
            Ok(mut pages) => {
                let before = pages.renders.len();
                pages.renders.retain(|key, _| !is_under(key, path));
                pages.generation = pages.generation.wrapping_add(1);
                tracing::debug!(path, dropped = before - pages.renders.len(), "revalidated path");
            }
            Err(e) => tracing::warn!("page cache lock poisoned: {}", e),
        }
    }
}
