//! Model registry holding the catalog and the active model.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use paimon_core::{Error, ModelSpec, Result};

/// Registry of available generation models.
///
/// The catalog is fixed at construction. The active model is an index into
/// it, so every read resolves to a catalog entry and a switch is a single
/// atomic store.
pub struct ModelRegistry {
    catalog: Vec<ModelSpec>,
    active: AtomicUsize,
}

impl ModelRegistry {
    /// Creates a registry over `catalog` with `default_model` active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the catalog is empty, has duplicate
    /// names, or does not contain `default_model`.
    pub fn new(catalog: Vec<ModelSpec>, default_model: &str) -> Result<Self> {
        if catalog.is_empty() {
            return Err(Error::invalid_config("model catalog must not be empty"));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = catalog.iter().find(|m| !seen.insert(m.name.as_str())) {
            return Err(Error::invalid_config(format!(
                "duplicate model name in catalog: {}",
                dup.name
            )));
        }

        let index = catalog
            .iter()
            .position(|m| m.name == default_model)
            .ok_or_else(|| {
                Error::invalid_config(format!(
                    "default model '{default_model}' is not in the catalog"
                ))
            })?;

        tracing::debug!(
            models = catalog.len(),
            active = %default_model,
            "Model registry created"
        );

        Ok(Self {
            catalog,
            active: AtomicUsize::new(index),
        })
    }

    /// Creates a registry over the built-in catalog with `default_model` active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `default_model` is not built in.
    pub fn builtin(default_model: &str) -> Result<Self> {
        Self::new(ModelSpec::builtin_catalog(), default_model)
    }

    /// Lists all models in catalog order.
    #[must_use]
    pub fn list_models(&self) -> &[ModelSpec] {
        &self.catalog
    }

    /// Returns `true` if `name` is in the catalog.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.catalog.iter().any(|m| m.name == name)
    }

    /// Returns the active model.
    #[must_use]
    pub fn get_active(&self) -> &ModelSpec {
        &self.catalog[self.active.load(Ordering::Acquire)]
    }

    /// Returns the active model name.
    #[must_use]
    pub fn active_name(&self) -> String {
        self.get_active().name.clone()
    }

    /// Makes `name` the active model.
    ///
    /// Returns `false` and leaves the active model untouched if `name` is not
    /// in the catalog. Concurrent callers serialize; the last one wins.
    pub fn set_active(&self, name: &str) -> bool {
        match self.catalog.iter().position(|m| m.name == name) {
            Some(index) => {
                let previous = self.active.swap(index, Ordering::AcqRel);
                tracing::info!(
                    from = %self.catalog[previous].name,
                    to = %name,
                    "Active model switched"
                );
                true
            }
            None => {
                tracing::warn!(requested = %name, "Rejected switch to unknown model");
                false
            }
        }
    }

    /// Returns the number of models in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Always `false`: construction rejects empty catalogs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        let catalog = ModelSpec::builtin_catalog();
        let index = catalog
            .iter()
            .position(|m| m.name == ModelSpec::DEFAULT_MODEL)
            .unwrap_or(0);
        Self {
            catalog,
            active: AtomicUsize::new(index),
        }
    }
}
