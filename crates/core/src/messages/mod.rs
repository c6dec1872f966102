//! Message domain model: the component tree callers build and the typed
//! responses they get back.
//!
//! A message owns a tree of components (metadata, filter clauses, combined
//! queries). Components are validated recursively before conversion and
//! converted bottom-up into the service's wire format by the client crate.

pub mod filters;
pub mod index;
pub mod metadata;
pub mod search;

pub use filters::clauses::{
    Clause, FieldExistsClause, RangeBound, RangeClause, TermClause, TermsClause,
};
pub use filters::queries::{AggregatedFilters, BooleanQuery, BoostingQuery, QueryFilter};
pub use index::{DeleteIndexItemMessage, IndexWebContentMessage, IndexingResponse};
pub use metadata::{Metadata, MetadataKind, MetadataValue};
pub use search::{SearchMessage, SearchResponse, SearchResult, SortDirection};

/// ISO-639-1 shape check: two lowercase ASCII letters.
pub(crate) fn is_valid_language_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_lowercase())
}
