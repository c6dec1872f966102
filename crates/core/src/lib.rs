//! Core domain model for the searchgate client library
//!
//! This crate provides the foundational abstractions used throughout
//! searchgate:
//!
//! - **Messages**: search queries, indexing operations and their component
//!   trees (metadata, filter clauses, combined queries)
//! - **Validation**: the declarative, violation-aggregating validation
//!   engine messages run through before conversion
//! - **Configuration**: connection settings for the remote service
//! - **Error handling**: unified error types
//!

pub mod config;
pub mod error;
pub mod messages;
pub mod validation;

// Re-export main types for convenience
pub use config::{SearchGateConfig, ServiceConfig};
pub use error::{Error, Result, ResultExt};
pub use messages::{
    BooleanQuery, BoostingQuery, Clause, DeleteIndexItemMessage, IndexWebContentMessage,
    IndexingResponse, Metadata, MetadataKind, MetadataValue, SearchMessage, SearchResponse,
    SortDirection,
};
pub use validation::{ValidationResult, Validator, Violation};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::SearchGateConfig;
    pub use crate::error::{Result, ResultExt};
    pub use crate::messages::{Metadata, SearchMessage};
    pub use crate::validation::Validator;
}
