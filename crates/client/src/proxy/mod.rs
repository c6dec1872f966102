//! The proxy: orchestrates conversion of message trees into wire documents.
//!
//! Conversion walks the component tree post-order: children are converted
//! first, in their defined order, and each composite's converter receives
//! the ordered list of non-empty child fragments. A converter returning
//! `None` signals "omit this node" — empty aggregation groups never appear
//! in the wire document.

pub mod converters;
pub mod registry;

mod messages;

pub use registry::{ComponentTypeId, ConverterRegistry};

use searchgate_core::messages::filters::queries::QueryFilter;
use searchgate_core::messages::{AggregatedFilters, BooleanQuery, BoostingQuery, Clause, Metadata};
use searchgate_core::Result;
use serde_json::Value;

/// Borrowed view over one node of a message's component tree.
///
/// Converters and the traversal work against this view, so composite owners
/// (a boolean query holding its buckets as plain fields) expose their
/// children uniformly without cloning.
#[derive(Clone, Copy)]
pub enum ComponentRef<'a> {
    Metadata(&'a Metadata),
    Clause(&'a Clause),
    Aggregated(&'a AggregatedFilters),
    Boolean(&'a BooleanQuery),
    Boosting(&'a BoostingQuery),
}

impl<'a> ComponentRef<'a> {
    pub fn type_id(&self) -> ComponentTypeId {
        match self {
            Self::Metadata(_) => ComponentTypeId::Metadata,
            Self::Clause(Clause::Term(_)) => ComponentTypeId::TermClause,
            Self::Clause(Clause::Terms(_)) => ComponentTypeId::TermsClause,
            Self::Clause(Clause::FieldExists(_)) => ComponentTypeId::FieldExistsClause,
            Self::Clause(Clause::Range(_)) => ComponentTypeId::RangeClause,
            Self::Aggregated(_) => ComponentTypeId::AggregatedFilters,
            Self::Boolean(_) => ComponentTypeId::BooleanQuery,
            Self::Boosting(_) => ComponentTypeId::BoostingQuery,
        }
    }

    /// Child components in their defined order; `None` for leaves.
    ///
    /// Composite buckets are always listed, empty or not — emptiness is
    /// decided fragment-side, by converters returning `None`.
    fn children(&self) -> Option<Vec<ComponentRef<'a>>> {
        match self {
            Self::Metadata(_) | Self::Clause(_) => None,
            Self::Aggregated(query) => {
                Some(query.filters().iter().map(ComponentRef::from_filter).collect())
            }
            Self::Boolean(query) => Some(vec![
                Self::Aggregated(query.must()),
                Self::Aggregated(query.should()),
                Self::Aggregated(query.must_not()),
            ]),
            Self::Boosting(query) => Some(vec![
                Self::Aggregated(query.positive_filters()),
                Self::Aggregated(query.negative_filters()),
            ]),
        }
    }

    fn from_filter(filter: &'a QueryFilter) -> ComponentRef<'a> {
        match filter {
            QueryFilter::Clause(clause) => Self::Clause(clause),
            QueryFilter::Boolean(query) => Self::Boolean(query),
            QueryFilter::Boosting(query) => Self::Boosting(query),
            QueryFilter::Aggregated(query) => Self::Aggregated(query),
        }
    }
}

/// Converts component trees and assembles request documents.
pub struct Proxy {
    registry: ConverterRegistry,
}

impl Proxy {
    pub fn new() -> Self {
        Self {
            registry: ConverterRegistry::with_defaults(),
        }
    }

    /// A proxy over a custom registry; intended for tests and extensions.
    pub fn with_registry(registry: ConverterRegistry) -> Self {
        Self { registry }
    }

    /// Converts one component subtree, post-order.
    ///
    /// `Ok(None)` means the node converted to nothing (an empty aggregation)
    /// and must be omitted by its parent.
    pub fn convert_component(&self, component: ComponentRef<'_>) -> Result<Option<Value>> {
        let converter = self.registry.lookup(component.type_id())?;
        match component.children() {
            None => converter.convert(component),
            Some(children) => {
                let mut fragments = Vec::with_capacity(children.len());
                for child in children {
                    if let Some(fragment) = self.convert_component(child)? {
                        fragments.push(fragment);
                    }
                }
                converter.convert_with_children(component, fragments)
            }
        }
    }
}

impl Default for Proxy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use searchgate_core::messages::{Metadata, TermClause};
    use searchgate_core::Error;
    use serde_json::json;

    #[test]
    fn test_composite_conversion_follows_insertion_order() {
        let mut aggregated = AggregatedFilters::new("must");
        aggregated.add_clause(TermClause::new(Metadata::string("first"), "1"));
        aggregated.add_clause(TermClause::new(Metadata::string("second"), "2"));

        let proxy = Proxy::new();
        let fragment = proxy
            .convert_component(ComponentRef::Aggregated(&aggregated))
            .unwrap()
            .unwrap();

        assert_eq!(
            fragment,
            json!({"must": [
                {"term": {"esST_first": "1"}},
                {"term": {"esST_second": "2"}}
            ]})
        );
    }

    #[test]
    fn test_empty_subtrees_are_omitted_entirely() {
        let mut boolean = BooleanQuery::new();
        boolean.add_must(QueryFilter::Aggregated(AggregatedFilters::new("inner")));

        let proxy = Proxy::new();
        let fragment = proxy
            .convert_component(ComponentRef::Boolean(&boolean))
            .unwrap();

        assert_eq!(fragment, None);
    }

    #[test]
    fn test_missing_converter_aborts_conversion() {
        let clause = Clause::from(TermClause::new(Metadata::string("title"), "x"));
        let proxy = Proxy::with_registry(ConverterRegistry::new());

        let error = proxy
            .convert_component(ComponentRef::Clause(&clause))
            .unwrap_err();
        assert!(matches!(error, Error::MissingConverter(_)));
    }
}
