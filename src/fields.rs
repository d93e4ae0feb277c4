//! Logical field keys
//!
//! The closed set of case fields whose symbolic values resolve to numeric
//! option ids, together with the hint tokens used to locate each field's
//! definition in the remote catalog.

use serde::{Deserialize, Serialize};

/// A logical case field with catalog-backed symbolic values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Severity,
    Priority,
    Behavior,
    Type,
    Status,
    Automation,
    Layer,
}

/// Hint tokens per field, kept as one reviewable table since catalog slugs
/// and titles vary slightly between deployments. A definition matches a key
/// when every token appears as a substring of its normalized slug or title.
const FIELD_HINTS: &[(FieldKey, &[&str])] = &[
    (FieldKey::Severity, &["case", "severity"]),
    (FieldKey::Priority, &["case", "priority"]),
    (FieldKey::Behavior, &["case", "behavior"]),
    (FieldKey::Type, &["case", "type"]),
    (FieldKey::Status, &["case", "status"]),
    (FieldKey::Automation, &["case", "automation"]),
    (FieldKey::Layer, &["case", "layer"]),
];

impl FieldKey {
    /// Every resolvable field key
    pub const ALL: [FieldKey; 7] = [
        FieldKey::Severity,
        FieldKey::Priority,
        FieldKey::Behavior,
        FieldKey::Type,
        FieldKey::Status,
        FieldKey::Automation,
        FieldKey::Layer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Severity => "severity",
            FieldKey::Priority => "priority",
            FieldKey::Behavior => "behavior",
            FieldKey::Type => "type",
            FieldKey::Status => "status",
            FieldKey::Automation => "automation",
            FieldKey::Layer => "layer",
        }
    }

    /// Hint tokens for locating this field's catalog definition
    pub fn hints(&self) -> &'static [&'static str] {
        FIELD_HINTS
            .iter()
            .find(|(key, _)| key == self)
            .map(|(_, hints)| *hints)
            .unwrap_or(&[])
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
