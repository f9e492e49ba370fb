use std::collections::HashMap;
use std::path::PathBuf;

use super::source::{TableSourceError, TaxTableSource};

/// Source-agnostic table configuration.
///
/// `source` must match the [`TableSourceFactory::source_name`] of a
/// registered factory. `location` is passed through to that factory
/// unchanged; its meaning is entirely source-specific.
///
/// | source      | location                               |
/// |-------------|----------------------------------------|
/// | `embedded`  | ignored                                |
/// | `directory` | data root containing `<year>/` folders |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSourceConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"embedded"`).
    pub source: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub location: Option<PathBuf>,
}

impl Default for TableSourceConfig {
    fn default() -> Self {
        Self {
            source: "embedded".to_string(),
            location: None,
        }
    }
}

/// One implementation per kind of table source. Each data crate exports a
/// unit struct that implements this trait and is registered with a
/// [`TableSourceRegistry`] at startup.
pub trait TableSourceFactory: Send + Sync {
    /// Unique, lowercase identifier for this source.
    fn source_name(&self) -> &'static str;

    /// Open the source described by `config`.
    fn create(
        &self,
        config: &TableSourceConfig,
    ) -> Result<Box<dyn TaxTableSource>, TableSourceError>;
}

/// Registry of [`TableSourceFactory`] instances, keyed by source name.
///
/// Typical lifetime:
/// 1. Create with `TableSourceRegistry::new()`.
/// 2. Call `register` once per known source.
/// 3. Call `create` once at startup and keep the tables it yields.
pub struct TableSourceRegistry {
    factories: HashMap<&'static str, Box<dyn TableSourceFactory>>,
}

impl TableSourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a source factory.
    ///
    /// If a factory with the same [`TableSourceFactory::source_name`] is
    /// already present it is silently replaced.
    pub fn register(
        &mut self,
        factory: Box<dyn TableSourceFactory>,
    ) {
        self.factories.insert(factory.source_name(), factory);
    }

    /// Names of every registered source, sorted alphabetically.
    pub fn available_sources(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.source` and return
    /// the table source it produces.
    ///
    /// # Errors
    /// * [`TableSourceError::Configuration`] if no factory is registered for
    ///   the requested source name.
    /// * Any error the chosen factory itself returns.
    pub fn create(
        &self,
        config: &TableSourceConfig,
    ) -> Result<Box<dyn TaxTableSource>, TableSourceError> {
        let factory = self
            .factories
            .get(config.source.as_str())
            .ok_or_else(|| {
                TableSourceError::Configuration(format!(
                    "unknown table source '{}'; available: {:?}",
                    config.source,
                    self.available_sources()
                ))
            })?;

        factory.create(config)
    }
}

impl Default for TableSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::{TableSourceConfig, TableSourceError, TableSourceFactory, TableSourceRegistry};
    use crate::tables::{TaxTableSource, UkNiTables, UsTaxTables};

    // ── stub source ──────────────────────────────────────────────────────
    // The tests only verify that the registry routes to the correct factory.
    struct StubSource;

    impl TaxTableSource for StubSource {
        fn source_name(&self) -> &'static str {
            "stub"
        }

        fn tax_years(&self) -> Result<Vec<i32>, TableSourceError> {
            Ok(vec![2025])
        }

        fn us_tables(
            &self,
            tax_year: i32,
        ) -> Result<UsTaxTables, TableSourceError> {
            Err(TableSourceError::YearNotAvailable(tax_year))
        }

        fn uk_tables(
            &self,
            tax_year: i32,
        ) -> Result<UkNiTables, TableSourceError> {
            Err(TableSourceError::YearNotAvailable(tax_year))
        }
    }

    // ── stub factory ─────────────────────────────────────────────────────
    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    impl StubFactory {
        fn new(name: &'static str) -> (Self, Arc<AtomicBool>) {
            let called = Arc::new(AtomicBool::new(false));
            (
                Self {
                    name,
                    called: Arc::clone(&called),
                },
                called,
            )
        }
    }

    impl TableSourceFactory for StubFactory {
        fn source_name(&self) -> &'static str {
            self.name
        }

        fn create(
            &self,
            _config: &TableSourceConfig,
        ) -> Result<Box<dyn TaxTableSource>, TableSourceError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubSource))
        }
    }

    fn config(source: &str) -> TableSourceConfig {
        TableSourceConfig {
            source: source.to_string(),
            location: None,
        }
    }

    #[test]
    fn new_registry_has_no_sources() {
        let registry = TableSourceRegistry::new();
        assert!(registry.available_sources().is_empty());
    }

    #[test]
    fn available_sources_are_sorted() {
        let mut registry = TableSourceRegistry::new();
        registry.register(Box::new(StubFactory::new("embedded").0));
        registry.register(Box::new(StubFactory::new("directory").0));

        assert_eq!(registry.available_sources(), vec!["directory", "embedded"]);
    }

    #[test]
    fn create_dispatches_to_matching_factory() {
        let mut registry = TableSourceRegistry::new();
        let (embedded, embedded_called) = StubFactory::new("embedded");
        let (directory, directory_called) = StubFactory::new("directory");
        registry.register(Box::new(embedded));
        registry.register(Box::new(directory));

        let source = registry.create(&config("directory")).expect("source");

        assert!(directory_called.load(Ordering::SeqCst));
        assert!(!embedded_called.load(Ordering::SeqCst));
        assert_eq!(source.tax_years().expect("years"), vec![2025]);
    }

    #[test]
    fn create_unknown_source_is_configuration_error() {
        let mut registry = TableSourceRegistry::new();
        registry.register(Box::new(StubFactory::new("embedded").0));

        let result = registry.create(&config("postgres"));

        match result {
            Err(TableSourceError::Configuration(msg)) => {
                assert!(msg.contains("postgres"), "message was: {msg}");
                assert!(msg.contains("embedded"), "message was: {msg}");
            }
            Err(other) => panic!("expected Configuration error, got {other:?}"),
            Ok(_) => panic!("expected Configuration error, got a source"),
        }
    }

    #[test]
    fn registering_same_name_replaces_factory() {
        let mut registry = TableSourceRegistry::new();
        let (first, first_called) = StubFactory::new("embedded");
        let (second, second_called) = StubFactory::new("embedded");
        registry.register(Box::new(first));
        registry.register(Box::new(second));

        registry.create(&config("embedded")).expect("source");

        assert_eq!(registry.available_sources(), vec!["embedded"]);
        assert!(!first_called.load(Ordering::SeqCst));
        assert!(second_called.load(Ordering::SeqCst));
    }

    #[test]
    fn default_config_uses_embedded_source() {
        assert_eq!(TableSourceConfig::default(), config("embedded"));
    }
}
