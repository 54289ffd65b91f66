// src/catalog/cache.rs
use crate::catalog::{build_catalog, BuildOptions, Catalog, CatalogError, Clock, SystemClock};
use crate::rentvine::PropertyGateway;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lazily built, shared catalog.
///
/// Without a TTL the first successful build is kept until `invalidate` or
/// `refresh` is called, so backend edits stay invisible until then. The slot
/// lock is held across the build: concurrent first callers wait for one
/// build instead of each starting their own.
pub struct CatalogCache {
    gateway: Arc<dyn PropertyGateway>,
    options: BuildOptions,
    ttl: Option<chrono::Duration>,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<Arc<Catalog>>>,
}

impl CatalogCache {
    pub fn new(gateway: Arc<dyn PropertyGateway>, options: BuildOptions) -> Self {
        Self {
            gateway,
            options,
            ttl: None,
            clock: Arc::new(SystemClock),
            slot: Mutex::new(None),
        }
    }

    pub fn with_ttl(mut self, ttl: Option<chrono::Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn get_catalog(&self) -> Result<Arc<Catalog>, CatalogError> {
        let mut slot = self.lock();

        if let Some(catalog) = slot.as_ref() {
            if !self.is_expired(catalog) {
                return Ok(Arc::clone(catalog));
            }
            tracing::info!(built_at = %catalog.built_at, "Catalog expired, rebuilding");
        }

        self.rebuild(&mut slot)
    }

    /// Drop the stored catalog; the next `get_catalog` rebuilds it.
    pub fn invalidate(&self) {
        *self.lock() = None;
        tracing::info!("Catalog invalidated");
    }

    /// Rebuild now. On failure the cache is left empty.
    pub fn refresh(&self) -> Result<Arc<Catalog>, CatalogError> {
        let mut slot = self.lock();
        self.rebuild(&mut slot)
    }

    /// The stored catalog, if any, without triggering a build.
    pub fn peek(&self) -> Option<Arc<Catalog>> {
        self.lock().clone()
    }

    fn rebuild(
        &self,
        slot: &mut MutexGuard<'_, Option<Arc<Catalog>>>,
    ) -> Result<Arc<Catalog>, CatalogError> {
        **slot = None;
        let catalog = Arc::new(build_catalog(
            self.gateway.as_ref(),
            &self.options,
            self.clock.now(),
        )?);
        **slot = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    fn is_expired(&self, catalog: &Catalog) -> bool {
        match self.ttl {
            Some(ttl) => self.clock.now() - catalog.built_at >= ttl,
            None => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<Catalog>>> {
        // A panic mid-build leaves the slot empty or holding a finished
        // catalog, both of which are fine to keep using.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
