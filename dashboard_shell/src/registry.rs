//! Explicit registration table of available dashboards.
//!
//! Dashboards are registered one by one with a descriptor and a factory;
//! there is no directory scanning. A malformed descriptor is logged and
//! skipped so one broken entry never takes the whole shell down.

use thiserror::Error;
use tracing::warn;

use crate::dashboard::Dashboard;
use crate::dashboards::{DetailedPrice, MarketOverview, SimplePrice};
use crate::descriptor::DashboardDescriptor;

type Factory = fn() -> Box<dyn Dashboard>;

/// One table row: the identity plus how to build the dashboard.
pub struct RegistryEntry {
    pub descriptor: DashboardDescriptor,
    factory: Factory,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no dashboard registered under `{0}`")]
    UnknownDashboard(String),
}

/// Ordered table of descriptor + factory pairs.
#[derive(Default)]
pub struct DashboardRegistry {
    entries: Vec<RegistryEntry>,
}

impl DashboardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with the three built-in dashboards installed.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(SimplePrice::descriptor_static(), || {
            Box::new(SimplePrice)
        });
        registry.register(MarketOverview::descriptor_static(), || {
            Box::new(MarketOverview)
        });
        registry.register(DetailedPrice::descriptor_static(), || {
            Box::new(DetailedPrice)
        });
        registry
    }

    /// Adds an entry, unless its descriptor is malformed. A malformed
    /// descriptor is skipped with a warning and the registry keeps going.
    pub fn register(&mut self, descriptor: DashboardDescriptor, factory: Factory) {
        if let Err(err) = descriptor.validate() {
            warn!(name = %descriptor.name, %err, "skipping dashboard with malformed descriptor");
            return;
        }
        if self.entries.iter().any(|e| e.descriptor.name == descriptor.name) {
            warn!(name = %descriptor.name, "skipping duplicate dashboard registration");
            return;
        }
        self.entries.push(RegistryEntry { descriptor, factory });
    }

    /// Entries in registration order.
    pub fn list(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Builds the dashboard registered under `name`.
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn Dashboard>, RegistryError> {
        self.entries
            .iter()
            .find(|e| e.descriptor.name == name)
            .map(|e| (e.factory)())
            .ok_or_else(|| RegistryError::UnknownDashboard(name.to_string()))
    }
}
