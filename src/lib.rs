//! Symbolic field value resolution for the Qase test-management API
//!
//! Translates human-readable field values (e.g. "critical") into the numeric
//! option ids the remote update API stores, with:
//! - Single-flight, invalidatable caching of the remote field catalog
//! - Case- and punctuation-insensitive label matching
//! - Self-diagnosing errors that enumerate the valid options

pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod resolver;

// Re-exports for convenience
pub use catalog::{FieldDefinition, FieldOption, MetadataSource};
pub use client::QaseMetadataSource;
pub use config::QaseConfig;
pub use error::{CatalogFetchError, ResolveError};
pub use fields::FieldKey;
pub use resolver::{FieldResolver, FieldValue};
