//! Symbolic value resolution
//!
//! Turns a (field key, raw value) pair into the canonical numeric option id.
//! Numeric inputs pass through untouched; labels are matched case- and
//! punctuation-insensitively against the cached catalog.

use std::sync::Arc;

use tracing::debug;

use crate::cache::CatalogCache;
use crate::catalog::{FieldDefinition, FieldOption, MetadataSource};
use crate::error::ResolveError;
use crate::fields::FieldKey;

/// Raw input for a field: an already-resolved numeric id, or a
/// human-readable label that needs catalog matching
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Numeric(i64),
    Label(String),
}

impl From<i64> for FieldValue {
    fn from(id: i64) -> Self {
        FieldValue::Numeric(id)
    }
}

impl From<&str> for FieldValue {
    fn from(label: &str) -> Self {
        FieldValue::Label(label.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(label: String) -> Self {
        FieldValue::Label(label)
    }
}

/// Resolves symbolic field values to the numeric option ids the remote
/// update API accepts
pub struct FieldResolver {
    cache: CatalogCache,
}

impl FieldResolver {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self {
            cache: CatalogCache::new(source),
        }
    }

    /// Resolve `value` for `key` to a numeric option id.
    ///
    /// Numeric values and integral numeric strings are trusted as real ids
    /// and returned without touching the catalog. Everything else is matched
    /// against the field's options; the field itself is located by hint
    /// tokens since catalog slugs vary between deployments.
    pub async fn resolve(
        &self,
        key: FieldKey,
        value: impl Into<FieldValue>,
    ) -> Result<i64, ResolveError> {
        let label = match value.into() {
            FieldValue::Numeric(id) => return Ok(id),
            FieldValue::Label(label) => label,
        };

        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::EmptyValue { key });
        }
        if let Ok(id) = trimmed.parse::<i64>() {
            return Ok(id);
        }

        let catalog = self
            .cache
            .catalog()
            .await
            .map_err(|source| ResolveError::FieldUnavailable {
                key,
                source: Some(source),
            })?;

        let field = find_field(&catalog, key).ok_or(ResolveError::FieldUnavailable {
            key,
            source: None,
        })?;

        let wanted = normalize(trimmed);
        let matches: Vec<&FieldOption> = field
            .options
            .iter()
            .filter(|option| option_matches(option, &wanted))
            .collect();

        let mut ids: Vec<i64> = matches.iter().filter_map(|option| option.id).collect();
        ids.sort_unstable();
        ids.dedup();

        match ids.as_slice() {
            [] => Err(ResolveError::UnknownValue {
                key,
                value: label.clone(),
                available: describe_options(&field.options),
            }),
            [id] => {
                debug!("Resolved {} \"{}\" to option id {}", key, trimmed, id);
                Ok(*id)
            }
            _ => Err(ResolveError::AmbiguousValue {
                key,
                value: label.clone(),
                matches: describe_options(matches.iter().copied()),
            }),
        }
    }

    /// Forces the next resolution to refetch the catalog. Intended for
    /// long-running processes where the remote metadata may change.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }
}

/// Lowercases and strips everything but letters and digits, so "Not
/// Applicable", "not-applicable" and "NOTAPPLICABLE" compare equal.
fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

// AND semantics over hint tokens, substring rather than equality.
fn matches_hints(text: Option<&str>, hints: &[&str]) -> bool {
    text.map_or(false, |text| {
        let normalized = normalize(text);
        hints.iter().all(|hint| normalized.contains(&normalize(hint)))
    })
}

// First definition matching the key's hints wins; catalog order is
// deployment-defined and ties between definitions are not broken here.
fn find_field(catalog: &[FieldDefinition], key: FieldKey) -> Option<&FieldDefinition> {
    let hints = key.hints();
    catalog.iter().find(|field| {
        matches_hints(field.slug.as_deref(), hints) || matches_hints(field.title.as_deref(), hints)
    })
}

// Option matching is exact on normalized strings, unlike the loose field
// lookup, to avoid ambiguous partial matches among option values.
fn option_matches(option: &FieldOption, wanted: &str) -> bool {
    let text_matches = |text: Option<&str>| text.map_or(false, |text| normalize(text) == wanted);
    text_matches(option.slug.as_deref())
        || text_matches(option.title.as_deref())
        || option
            .id
            .map_or(false, |id| normalize(&id.to_string()) == wanted)
}

fn option_label(option: &FieldOption) -> Option<String> {
    option
        .title
        .clone()
        .filter(|title| !title.is_empty())
        .or_else(|| option.slug.clone().filter(|slug| !slug.is_empty()))
        .or_else(|| option.id.map(|id| id.to_string()))
}

fn describe_options<'a>(options: impl IntoIterator<Item = &'a FieldOption>) -> String {
    let labels: Vec<String> = options.into_iter().filter_map(option_label).collect();
    if labels.is_empty() {
        "unknown".to_string()
    } else {
        labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: i64, slug: &str, title: &str) -> FieldOption {
        FieldOption {
            id: Some(id),
            slug: Some(slug.to_string()),
            title: Some(title.to_string()),
        }
    }

    #[test]
    fn test_normalize_strips_case_and_punctuation() {
        assert_eq!(normalize("Not Applicable"), "notapplicable");
        assert_eq!(normalize("not-applicable"), "notapplicable");
        assert_eq!(normalize("NOTAPPLICABLE"), "notapplicable");
        assert_eq!(normalize("Critical!"), "critical");
        assert_eq!(normalize("  3 "), "3");
    }

    #[test]
    fn test_hint_matching_requires_every_token() {
        assert!(matches_hints(Some("case_severity"), &["case", "severity"]));
        assert!(matches_hints(Some("Case Severity"), &["case", "severity"]));
        assert!(!matches_hints(Some("severity"), &["case", "severity"]));
        assert!(!matches_hints(None, &["case"]));
    }

    #[test]
    fn test_option_matching_is_exact_after_normalization() {
        let critical = option(2, "critical", "Critical");
        assert!(option_matches(&critical, "critical"));
        assert!(!option_matches(&critical, "crit"));
        assert!(option_matches(&critical, "2"));
    }

    #[test]
    fn test_describe_options_prefers_title_then_slug_then_id() {
        let options = vec![
            option(1, "low", "Low"),
            FieldOption {
                id: Some(2),
                slug: Some("normal".to_string()),
                title: None,
            },
            FieldOption {
                id: Some(3),
                slug: None,
                title: None,
            },
        ];
        assert_eq!(describe_options(&options), "Low, normal, 3");
        assert_eq!(describe_options(&[]), "unknown");
    }
}
