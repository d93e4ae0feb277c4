//! Remote field catalog data model
//!
//! Wire-shaped types for the catalog of field definitions the metadata
//! endpoint reports, and the collaborator trait that fetches it. Deployment
//! metadata is frequently partial, so every descriptive attribute is
//! optional and a missing option list decodes to an empty one.

use async_trait::async_trait;
use serde::Deserialize;
use serde::Deserializer;

/// One selectable value of a field. Only the numeric id is accepted by the
/// remote update API; slug and title exist for humans.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// One entry of the remote field catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldDefinition {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<FieldOption>,
}

// The endpoint reports `options: null` for fields without values.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<FieldOption>, D::Error>
where
    D: Deserializer<'de>,
{
    let options = Option::<Vec<FieldOption>>::deserialize(deserializer)?;
    Ok(options.unwrap_or_default())
}

/// Source of the full field catalog. Implemented by the bundled HTTP client
/// and by test doubles; the cache layer guarantees it is called at most once
/// per process lifetime unless invalidated.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_field_catalog(&self) -> anyhow::Result<Vec<FieldDefinition>>;
}
