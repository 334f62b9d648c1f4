//! Multi-reporter dispatcher
//!
//! Resolves the effective options for a run, instantiates every enabled
//! reporter in `reporterEnabled` order, and relays each run event to all of
//! them. The dispatcher itself is a [`Reporter`], so a host runner drives it
//! like any single reporter.

mod error;

pub use error::MultiReporterError;

use mrep_events::{Reporter, ReporterError, RunEvent, Runner};

use crate::config::{EffectiveOptions, OptionsResolver, Overrides};
use crate::options::{ReporterDescriptor, ReporterOptionsExtractor};
use crate::registry::ReporterRegistry;

/// Lifecycle phase of a dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Relaying events
    Active,
    /// Completion has been forwarded; further `done` calls are ignored
    Finished,
}

struct Registered {
    descriptor: ReporterDescriptor,
    reporter: Box<dyn Reporter>,
}

/// Fans one event stream out to several reporters.
pub struct MultiReporter {
    options: EffectiveOptions,
    reporters: Vec<Registered>,
    phase: Phase,
}

/// Configures how a [`MultiReporter`] resolves its options.
pub struct MultiReporterBuilder<'a> {
    registry: &'a ReporterRegistry,
    resolver: OptionsResolver,
    extractor: ReporterOptionsExtractor,
}

impl<'a> MultiReporterBuilder<'a> {
    /// Use a resolver with a different default configuration file.
    pub fn resolver(mut self, resolver: OptionsResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Use a different primary reporter identifier.
    pub fn extractor(mut self, extractor: ReporterOptionsExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Resolve options and instantiate every enabled reporter.
    pub fn build(
        self,
        overrides: Option<&Overrides>,
    ) -> Result<MultiReporter, MultiReporterError> {
        let options = self.resolver.get_options(overrides)?;
        MultiReporter::from_options(self.registry, &self.extractor, options)
    }
}

impl MultiReporter {
    /// Resolve options with the default resolver and instantiate reporters.
    pub fn new(
        registry: &ReporterRegistry,
        overrides: Option<&Overrides>,
    ) -> Result<Self, MultiReporterError> {
        Self::builder(registry).build(overrides)
    }

    pub fn builder(registry: &ReporterRegistry) -> MultiReporterBuilder<'_> {
        MultiReporterBuilder {
            registry,
            resolver: OptionsResolver::new(),
            extractor: ReporterOptionsExtractor::default(),
        }
    }

    /// Instantiate reporters from already-resolved options.
    ///
    /// Every occurrence in `reporterEnabled` gets its own instance and its own
    /// options object, duplicates included.
    pub fn from_options(
        registry: &ReporterRegistry,
        extractor: &ReporterOptionsExtractor,
        options: EffectiveOptions,
    ) -> Result<Self, MultiReporterError> {
        let enabled = options.reporter_enabled()?;
        if enabled.is_empty() {
            return Err(MultiReporterError::NoReporters);
        }

        let mut reporters = Vec::with_capacity(enabled.len());
        for identifier in enabled {
            let resolved = registry
                .resolve(&identifier)
                .ok_or_else(|| MultiReporterError::UnresolvedReporter {
                    name: identifier.clone(),
                })?;

            let descriptor = extractor.descriptor(&options, &identifier);
            let reporter = resolved
                .build(&descriptor.resolved_options)
                .map_err(|source| MultiReporterError::Construct {
                    name: identifier.clone(),
                    source,
                })?;

            tracing::debug!(
                reporter = %identifier,
                builtin = resolved.is_builtin(),
                options_key = %descriptor.options_key,
                "registered reporter"
            );
            reporters.push(Registered { descriptor, reporter });
        }

        Ok(Self {
            options,
            reporters,
            phase: Phase::Active,
        })
    }

    /// The effective options this dispatcher was built from.
    pub fn options(&self) -> &EffectiveOptions {
        &self.options
    }

    /// Descriptors of the registered reporters, in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ReporterDescriptor> {
        self.reporters.iter().map(|r| &r.descriptor)
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Drive `runner` with this dispatcher and return the failure count.
    pub fn run(&mut self, runner: &mut Runner) -> Result<usize, MultiReporterError> {
        Ok(runner.run(self)?)
    }
}

impl Reporter for MultiReporter {
    fn on_event(&mut self, event: &RunEvent) -> Result<(), ReporterError> {
        tracing::trace!(event = event.name(), reporters = self.reporters.len(), "relaying event");
        for registered in &mut self.reporters {
            registered.reporter.on_event(event)?;
        }
        Ok(())
    }

    fn done(&mut self, failures: usize) -> Result<(), ReporterError> {
        if self.phase == Phase::Finished {
            tracing::debug!("ignoring repeated completion");
            return Ok(());
        }
        self.phase = Phase::Finished;
        for registered in &mut self.reporters {
            registered.reporter.done(failures)?;
        }
        Ok(())
    }
}
