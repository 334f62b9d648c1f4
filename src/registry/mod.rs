//! Reporter registry
//!
//! Maps reporter identifiers to factories. Built-in short names are fixed;
//! external reporters are registered by exact name at startup.

use std::collections::BTreeMap;
use std::fmt;

use mrep_events::{Reporter, ReporterError};

use crate::options::ReporterOptions;
use crate::reporters;

/// Builds a reporter from its extracted options.
pub type ReporterFactory =
    Box<dyn Fn(&ReporterOptions) -> Result<Box<dyn Reporter>, ReporterError>>;

type BuiltinFactory = fn(&ReporterOptions) -> Result<Box<dyn Reporter>, ReporterError>;

/// Built-in reporter short names, in display order
pub const BUILTIN_REPORTERS: &[&str] = &["spec", "dot", "xunit", "tap"];

fn builtin_factory(name: &str) -> Option<BuiltinFactory> {
    match name {
        "spec" => Some(reporters::create_spec as BuiltinFactory),
        "dot" => Some(reporters::create_dot as BuiltinFactory),
        "xunit" => Some(reporters::create_xunit as BuiltinFactory),
        "tap" => Some(reporters::create_tap as BuiltinFactory),
        _ => None,
    }
}

/// Where a reporter identifier resolved to
pub enum Resolved<'a> {
    Builtin(BuiltinFactory),
    External(&'a ReporterFactory),
}

impl Resolved<'_> {
    /// Construct the reporter.
    pub fn build(&self, options: &ReporterOptions) -> Result<Box<dyn Reporter>, ReporterError> {
        match self {
            Resolved::Builtin(factory) => factory(options),
            Resolved::External(factory) => factory(options),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Resolved::Builtin(_))
    }
}

/// Table of reporter factories
pub struct ReporterRegistry {
    builtins: bool,
    external: BTreeMap<String, ReporterFactory>,
}

impl Default for ReporterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ReporterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReporterRegistry")
            .field("builtins", &self.builtins)
            .field("external", &self.external.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ReporterRegistry {
    /// Registry with the built-in short names.
    pub fn with_builtins() -> Self {
        Self {
            builtins: true,
            external: BTreeMap::new(),
        }
    }

    /// Registry with no built-in reporters; only registered externals resolve.
    pub fn empty() -> Self {
        Self {
            builtins: false,
            external: BTreeMap::new(),
        }
    }

    /// Register an external reporter under its exact name.
    ///
    /// Built-in short names take precedence, so registering one of them has
    /// no effect on resolution while built-ins are enabled.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&ReporterOptions) -> Result<Box<dyn Reporter>, ReporterError> + 'static,
    {
        let name = name.into();
        if self.builtins && builtin_factory(&name).is_some() {
            tracing::warn!(reporter = %name, "external reporter shadowed by built-in");
        }
        self.external.insert(name, Box::new(factory));
        self
    }

    /// Look up a reporter: built-in table first, then registered externals.
    pub fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        if self.builtins {
            if let Some(factory) = builtin_factory(name) {
                return Some(Resolved::Builtin(factory));
            }
        }
        self.external.get(name).map(Resolved::External)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// All resolvable names: built-ins in table order, then externals sorted.
    pub fn names(&self) -> Vec<String> {
        let builtins = if self.builtins { BUILTIN_REPORTERS } else { &[] };
        builtins
            .iter()
            .map(|s| s.to_string())
            .chain(
                self.external
                    .keys()
                    .filter(|name| !self.builtins || builtin_factory(name).is_none())
                    .cloned(),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrep_events::RunEvent;

    struct Null;

    impl Reporter for Null {
        fn on_event(&mut self, _event: &RunEvent) -> Result<(), ReporterError> {
            Ok(())
        }
    }

    #[test]
    fn test_builtins_resolve() {
        let registry = ReporterRegistry::with_builtins();
        for name in BUILTIN_REPORTERS {
            assert!(registry.resolve(name).is_some_and(|r| r.is_builtin()), "{name}");
        }
        assert!(registry.resolve("mocha-junit-reporter").is_none());
    }

    #[test]
    fn test_external_resolves_by_exact_name() {
        let mut registry = ReporterRegistry::with_builtins();
        registry.register("mocha-junit-reporter", |_| Ok(Box::new(Null) as Box<dyn Reporter>));

        assert!(registry.contains("mocha-junit-reporter"));
        assert!(!registry.contains("Mocha-Junit-Reporter"));
        assert!(!registry.resolve("mocha-junit-reporter").unwrap().is_builtin());
    }

    #[test]
    fn test_builtin_shadows_external() {
        let mut registry = ReporterRegistry::with_builtins();
        registry.register("dot", |_| Err(ReporterError::message("never called")));

        let resolved = registry.resolve("dot").unwrap();
        assert!(resolved.is_builtin());
        assert_eq!(registry.names(), vec!["spec", "dot", "xunit", "tap"]);
    }

    #[test]
    fn test_empty_registry() {
        let mut registry = ReporterRegistry::empty();
        assert!(registry.resolve("spec").is_none());

        registry.register("spec", |_| Ok(Box::new(Null) as Box<dyn Reporter>));
        assert!(!registry.resolve("spec").unwrap().is_builtin());
        assert_eq!(registry.names(), vec!["spec"]);
    }

    #[test]
    fn test_external_factory_receives_options() {
        let mut registry = ReporterRegistry::empty();
        registry.register("picky", |options| {
            if options.get_str("mochaFile").is_some() {
                Ok(Box::new(Null) as Box<dyn Reporter>)
            } else {
                Err(ReporterError::message("picky: mochaFile is required"))
            }
        });

        let err = registry
            .resolve("picky")
            .unwrap()
            .build(&ReporterOptions::for_id("picky"))
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "picky: mochaFile is required");
    }
}
