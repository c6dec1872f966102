//! Converter lookup by component type.

use crate::proxy::converters::{
    AggregatedFiltersConverter, BooleanQueryConverter, BoostingQueryConverter, ComponentConverter,
    FieldExistsClauseConverter, MetadataConverter, RangeClauseConverter, TermClauseConverter,
    TermsClauseConverter,
};
use searchgate_core::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// Type tag of a component, used as the converter lookup key.
///
/// A closed enumeration: every node a message tree can contain has exactly
/// one tag, so conversion dispatch is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentTypeId {
    Metadata,
    TermClause,
    TermsClause,
    FieldExistsClause,
    RangeClause,
    AggregatedFilters,
    BooleanQuery,
    BoostingQuery,
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Metadata => "metadata",
            Self::TermClause => "filters.clauses.term",
            Self::TermsClause => "filters.clauses.terms",
            Self::FieldExistsClause => "filters.clauses.fieldExists",
            Self::RangeClause => "filters.clauses.range",
            Self::AggregatedFilters => "filters.combined.aggregate",
            Self::BooleanQuery => "filters.combined.booleanQuery",
            Self::BoostingQuery => "filters.combined.boostingQuery",
        };
        write!(f, "{name}")
    }
}

/// Process-wide map from component type to converter.
///
/// Populated once at client construction and read-only afterwards; safe to
/// share across concurrent conversions.
pub struct ConverterRegistry {
    converters: HashMap<ComponentTypeId, Box<dyn ComponentConverter>>,
}

impl ConverterRegistry {
    /// An empty registry. Most callers want [`ConverterRegistry::with_defaults`].
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Registry with every built-in converter registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ComponentTypeId::Metadata, Box::new(MetadataConverter));
        registry.register(ComponentTypeId::TermClause, Box::new(TermClauseConverter));
        registry.register(ComponentTypeId::TermsClause, Box::new(TermsClauseConverter));
        registry.register(
            ComponentTypeId::FieldExistsClause,
            Box::new(FieldExistsClauseConverter),
        );
        registry.register(ComponentTypeId::RangeClause, Box::new(RangeClauseConverter));
        registry.register(
            ComponentTypeId::AggregatedFilters,
            Box::new(AggregatedFiltersConverter),
        );
        registry.register(
            ComponentTypeId::BooleanQuery,
            Box::new(BooleanQueryConverter),
        );
        registry.register(
            ComponentTypeId::BoostingQuery,
            Box::new(BoostingQueryConverter),
        );
        registry
    }

    /// Registers (or replaces) the converter for a component type.
    pub fn register(&mut self, type_id: ComponentTypeId, converter: Box<dyn ComponentConverter>) {
        self.converters.insert(type_id, converter);
    }

    /// Looks a converter up. A miss is a configuration error: the registry
    /// was built without a converter the message tree needs.
    pub fn lookup(&self, type_id: ComponentTypeId) -> Result<&dyn ComponentConverter> {
        self.converters
            .get(&type_id)
            .map(Box::as_ref)
            .ok_or_else(|| Error::MissingConverter(type_id.to_string()))
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_is_a_configuration_error() {
        let registry = ConverterRegistry::new();
        let error = registry.lookup(ComponentTypeId::TermClause).err().unwrap();

        assert!(matches!(error, Error::MissingConverter(_)));
        assert!(error.to_string().contains("filters.clauses.term"));
    }

    #[test]
    fn test_default_registry_covers_every_component_type() {
        let registry = ConverterRegistry::with_defaults();
        for type_id in [
            ComponentTypeId::Metadata,
            ComponentTypeId::TermClause,
            ComponentTypeId::TermsClause,
            ComponentTypeId::FieldExistsClause,
            ComponentTypeId::RangeClause,
            ComponentTypeId::AggregatedFilters,
            ComponentTypeId::BooleanQuery,
            ComponentTypeId::BoostingQuery,
        ] {
            assert!(registry.lookup(type_id).is_ok(), "missing {type_id}");
        }
    }
}
