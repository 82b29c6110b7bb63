//! The in-process catalog: an immutable snapshot swapped wholesale on reload.
//!
//! Readers take an `Arc` to the current snapshot and keep using it for as
//! long as they like; a reload or menu attachment publishes a new snapshot
//! without disturbing them.

use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use sha2::{Digest, Sha256};

use hawkersg_core::{HawkerCenter, MenuItem, Stall};

use crate::client::HawkerApiClient;
use crate::diagnostics::Diagnostic;
use crate::error::CatalogError;
use crate::normalize::{normalize_catalog_json, NormalizedCatalog};

/// One normalized catalog, never mutated once published.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    catalog: NormalizedCatalog,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn new(catalog: NormalizedCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn hawkers(&self) -> &[HawkerCenter] {
        &self.catalog.hawkers
    }

    #[must_use]
    pub fn stalls(&self) -> &[Stall] {
        &self.catalog.stalls
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.catalog.diagnostics
    }

    #[must_use]
    pub fn catalog(&self) -> &NormalizedCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.hawkers.is_empty() && self.catalog.stalls.is_empty()
    }

    /// Hex SHA-256 of the serialized hawker and stall arrays. Two snapshots
    /// normalized from the same input have the same fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Encode`] if the catalog cannot be serialized.
    pub fn fingerprint(&self) -> Result<String, CatalogError> {
        let mut hasher = Sha256::new();
        serde_json::to_writer(&mut hasher, &self.catalog).map_err(|e| CatalogError::Encode {
            context: "catalog fingerprint".to_owned(),
            source: e,
        })?;
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// Holds the current [`CatalogSnapshot`]. Starts empty.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot. Cheap; clones an `Arc`.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Publishes `catalog` as the new current snapshot.
    pub fn publish(&self, catalog: NormalizedCatalog) -> Arc<CatalogSnapshot> {
        let next = Arc::new(CatalogSnapshot::new(catalog));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
        next
    }

    /// Normalizes already-fetched raw arrays and publishes the result.
    pub fn replace_with(&self, hawkers: &[Value], stalls: &[Value]) -> Arc<CatalogSnapshot> {
        self.publish(normalize_catalog_json(hawkers, stalls))
    }

    /// Fetches both raw arrays, normalizes them and publishes the result.
    ///
    /// On failure nothing is published: the previous snapshot (empty before
    /// the first successful load) stays current.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`] from the fetch.
    pub async fn load(&self, client: &HawkerApiClient) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        match client.fetch_raw_catalog().await {
            Ok(raw) => Ok(self.replace_with(&raw.hawkers, &raw.stalls)),
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch hawker catalog; keeping current snapshot");
                Err(e)
            }
        }
    }

    /// Publishes a snapshot with `menu` attached to the first stall whose id
    /// is `stall_id`. Returns `false` (publishing nothing) if there is no
    /// such stall.
    pub fn attach_menu(&self, stall_id: &str, menu: Vec<MenuItem>) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let Some(position) = current.stalls().iter().position(|s| s.id == stall_id) else {
            return false;
        };
        let mut next = CatalogSnapshot::clone(&current);
        next.catalog.stalls[position].menu = menu;
        *current = Arc::new(next);
        true
    }

    /// Fetches the menu for `stall_id` by its license number and attaches it.
    /// Returns the number of items attached, or `None` if the stall is not in
    /// the current snapshot.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`] from the menu fetch.
    pub async fn load_menu(
        &self,
        client: &HawkerApiClient,
        stall_id: &str,
    ) -> Result<Option<usize>, CatalogError> {
        let snapshot = self.snapshot();
        let Some(stall) = snapshot.stall(stall_id) else {
            return Ok(None);
        };
        let menu = client.fetch_menu(&stall.license_number).await?;
        let count = menu.len();
        if self.attach_menu(stall_id, menu) {
            tracing::debug!(stall_id, items = count, "menu attached");
            Ok(Some(count))
        } else {
            Ok(None)
        }
    }
}
