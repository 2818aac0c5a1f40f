//! Per-placeholder audit entries.

use serde::Serialize;
use tsgen_model::{Configuration, ValueKind};
use tsgen_resolve::ResolvedSet;
use tsgen_substitute::SubstitutionReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Resolved and substituted at least once.
    Replaced,
    /// Resolved but the token never occurred in the document.
    Missing,
    /// No value was produced.
    Unresolved,
}

impl EntryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replaced => "replaced",
            Self::Missing => "missing",
            Self::Unresolved => "unresolved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    /// Column or operation name.
    pub source: String,
    pub placeholder: String,
    pub kind: ValueKind,
    /// Display form of the value; `None` when unresolved.
    pub value: Option<String>,
    pub count: usize,
    pub status: EntryStatus,
    pub locations: Vec<String>,
}

/// End-of-run tally, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementAudit {
    pub product: String,
    pub entries: Vec<AuditEntry>,
    pub missing: Vec<String>,
    pub unresolved: Vec<String>,
    /// Occurrences consumed by table placeholders.
    pub table_replacements: usize,
    /// Table nodes actually emitted (empty values emit none).
    pub tables_created: usize,
    pub total: usize,
    pub expected: Option<usize>,
}

impl ReplacementAudit {
    pub fn build(
        config: &Configuration,
        resolved: &ResolvedSet,
        substitution: &SubstitutionReport,
    ) -> Self {
        let entries: Vec<AuditEntry> = config
            .mappings
            .iter()
            .map(|spec| {
                let name = spec.placeholder.as_str();
                let value = resolved.get(name);
                let count = substitution.count(name).unwrap_or(0);
                let locations = substitution
                    .counts
                    .iter()
                    .find(|entry| entry.placeholder == name)
                    .map(|entry| entry.locations.clone())
                    .unwrap_or_default();
                let status = match (value, count) {
                    (None, _) => EntryStatus::Unresolved,
                    (Some(_), 0) => EntryStatus::Missing,
                    (Some(_), _) => EntryStatus::Replaced,
                };
                AuditEntry {
                    source: spec.source_label().to_string(),
                    placeholder: name.to_string(),
                    kind: value.map_or(spec.kind, |value| value.kind()),
                    value: value.map(|value| value.preview()),
                    count,
                    status,
                    locations,
                }
            })
            .collect();

        let names_with = |status: EntryStatus| {
            entries
                .iter()
                .filter(|entry| entry.status == status)
                .map(|entry| entry.placeholder.clone())
                .collect::<Vec<_>>()
        };
        let missing = names_with(EntryStatus::Missing);
        let unresolved = names_with(EntryStatus::Unresolved);
        let table_replacements = entries
            .iter()
            .filter(|entry| entry.kind == ValueKind::Table)
            .map(|entry| entry.count)
            .sum();

        Self {
            product: config.product_label().to_string(),
            missing,
            unresolved,
            table_replacements,
            tables_created: substitution.tables_created,
            total: substitution.total(),
            expected: config.expected_count,
            entries,
        }
    }

    pub fn entry(&self, placeholder: &str) -> Option<&AuditEntry> {
        self.entries
            .iter()
            .find(|entry| entry.placeholder == placeholder)
    }

    /// Entries shown row by row in the log: everything except table values.
    pub fn scalar_entries(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == ValueKind::Scalar)
    }
}
