//! Enricher Factory Registry
//!
//! Explicit registration table keyed by configuration string. There is no
//! runtime class loading involved, so an unknown identifier is a
//! deployment error and is surfaced at startup rather than per event.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use super::builtin::{HostnameEnricherFactory, ProcessEnricherFactory};
use super::{Enricher, NoopEnricher};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Unknown enricher factory '{name}' (registered: {available:?})")]
    UnknownFactory { name: String, available: Vec<String> },
    #[error("Enricher factory '{name}' failed: {cause}")]
    ConstructionFailed { name: String, cause: anyhow::Error },
}

/// Builds an enricher instance during startup.
pub trait EnricherFactory: Send + Sync {
    fn create(&self) -> anyhow::Result<Arc<dyn Enricher>>;
}

/// Registry of enricher factories.
///
/// Maps configuration identifiers to factory instances, enabling hosts to
/// plug in their own enrichment without the forwarder knowing about it.
pub struct EnricherRegistry {
    factories: HashMap<String, Arc<dyn EnricherFactory>>,
}

impl Default for EnricherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EnricherRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry preloaded with the built-in factories
    /// ("hostname", "process").
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("hostname", HostnameEnricherFactory);
        registry.register("process", ProcessEnricherFactory);
        registry
    }

    /// Register a factory under a configuration identifier.
    pub fn register<F: EnricherFactory + 'static>(&mut self, factory_type: &str, factory: F) {
        self.factories
            .insert(factory_type.to_string(), Arc::new(factory));
        tracing::debug!(factory_type = factory_type, "Registered enricher factory");
    }

    /// Check if a factory identifier is registered.
    pub fn has_factory(&self, factory_type: &str) -> bool {
        self.factories.contains_key(factory_type)
    }

    /// Get all registered factory identifiers.
    pub fn factory_types(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// Resolve the enricher handle used for the forwarder's lifetime.
    ///
    /// A configured identifier must resolve; any fault here is fatal to
    /// startup. Without an identifier the injected default capability is
    /// used when present, otherwise enrichment resolves to a no-op.
    pub fn resolve(
        &self,
        configured: Option<&str>,
        default: Option<Arc<dyn Enricher>>,
    ) -> Result<Arc<dyn Enricher>, ResolveError> {
        if let Some(name) = configured {
            let factory = self
                .factories
                .get(name)
                .ok_or_else(|| ResolveError::UnknownFactory {
                    name: name.to_string(),
                    available: self.factory_types(),
                })?;
            let enricher = factory
                .create()
                .map_err(|cause| ResolveError::ConstructionFailed {
                    name: name.to_string(),
                    cause,
                })?;
            tracing::debug!(
                factory_type = name,
                enricher = enricher.name(),
                "Resolved configured enricher"
            );
            return Ok(enricher);
        }

        if let Some(enricher) = default {
            tracing::debug!(enricher = enricher.name(), "Resolved default enricher");
            return Ok(enricher);
        }

        tracing::debug!("No enricher configured");
        Ok(Arc::new(NoopEnricher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Notice;

    struct MockEnricher {
        name: &'static str,
    }

    impl Enricher for MockEnricher {
        fn name(&self) -> &str {
            self.name
        }

        fn enhance(&self, notice: &mut Notice) -> anyhow::Result<()> {
            notice
                .context
                .insert("enriched_by".to_string(), self.name.to_string());
            Ok(())
        }
    }

    struct MockFactory {
        name: &'static str,
    }

    impl EnricherFactory for MockFactory {
        fn create(&self) -> anyhow::Result<Arc<dyn Enricher>> {
            Ok(Arc::new(MockEnricher { name: self.name }))
        }
    }

    struct FailingFactory;

    impl EnricherFactory for FailingFactory {
        fn create(&self) -> anyhow::Result<Arc<dyn Enricher>> {
            Err(anyhow::anyhow!("missing credentials"))
        }
    }

    #[test]
    fn test_register_factory() {
        let mut registry = EnricherRegistry::new();

        registry.register("request", MockFactory { name: "request" });

        assert!(registry.has_factory("request"));
        assert!(!registry.has_factory("nonexistent"));
    }

    #[test]
    fn test_resolve_configured_factory() {
        let mut registry = EnricherRegistry::new();
        registry.register("request", MockFactory { name: "request" });

        let enricher = registry.resolve(Some("request"), None).unwrap();

        assert_eq!(enricher.name(), "request");
    }

    #[test]
    fn test_unknown_factory_is_fatal() {
        let registry = EnricherRegistry::new();

        let result = registry.resolve(Some("nonexistent"), None);

        assert!(matches!(
            result,
            Err(ResolveError::UnknownFactory { name, .. }) if name == "nonexistent"
        ));
    }

    #[test]
    fn test_construction_failure_is_fatal() {
        let mut registry = EnricherRegistry::new();
        registry.register("broken", FailingFactory);

        let result = registry.resolve(Some("broken"), None);

        assert!(matches!(
            result,
            Err(ResolveError::ConstructionFailed { name, .. }) if name == "broken"
        ));
    }

    #[test]
    fn test_no_identifier_uses_injected_default() {
        let registry = EnricherRegistry::new();
        let default: Arc<dyn Enricher> = Arc::new(MockEnricher { name: "injected" });

        let enricher = registry.resolve(None, Some(default)).unwrap();

        assert_eq!(enricher.name(), "injected");
    }

    #[test]
    fn test_no_identifier_without_default_resolves_to_noop() {
        let registry = EnricherRegistry::new();

        let enricher = registry.resolve(None, None).unwrap();

        assert_eq!(enricher.name(), "noop");
    }

    #[test]
    fn test_builtins_are_registered() {
        let registry = EnricherRegistry::with_builtins();

        assert!(registry.has_factory("hostname"));
        assert!(registry.has_factory("process"));
        assert!(registry.resolve(Some("hostname"), None).is_ok());
    }
}
