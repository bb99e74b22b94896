//! Lookup table from pattern-type identifier to generator.

use std::collections::HashMap;

use log::{debug, warn};
use once_cell::sync::Lazy;

use crate::error::PatternError;
use crate::generators::{BUILTIN_GENERATORS, PatternGenerator};

/// Maps pattern-type identifiers to generator records.
///
/// Identifiers are unique; registration order is kept only so error
/// messages and listings are stable.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    generators: HashMap<&'static str, PatternGenerator>,
    order: Vec<&'static str>,
}

impl PatternRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the seven built-in generators.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for generator in BUILTIN_GENERATORS {
            if let Err(err) = registry.register(generator) {
                warn!("skipping built-in generator: {err}");
            }
        }
        registry
    }

    /// Add a generator. Fails if its identifier is already taken.
    pub fn register(&mut self, generator: PatternGenerator) -> Result<(), PatternError> {
        let id = generator.pattern_type;
        if self.generators.contains_key(id) {
            return Err(PatternError::DuplicateType(id.to_string()));
        }
        debug!("registered pattern generator \"{id}\"");
        self.generators.insert(id, generator);
        self.order.push(id);
        Ok(())
    }

    /// Find the generator for `pattern_type`.
    ///
    /// The error lists every registered identifier in registration order.
    pub fn lookup(&self, pattern_type: &str) -> Result<&PatternGenerator, PatternError> {
        self.generators
            .get(pattern_type)
            .ok_or_else(|| PatternError::NotRegistered {
                pattern_type: pattern_type.to_string(),
                available: self.types().map(str::to_string).collect(),
            })
    }

    /// Registered identifiers, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn contains(&self, pattern_type: &str) -> bool {
        self.generators.contains_key(pattern_type)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

static DEFAULT_REGISTRY: Lazy<PatternRegistry> = Lazy::new(PatternRegistry::builtin);

/// The process-wide registry of built-in generators, built on first use.
pub fn default_registry() -> &'static PatternRegistry {
    &DEFAULT_REGISTRY
}
