//! Per-placeholder substitution counts.

use serde::Serialize;
use tsgen_document::ParagraphLocation;
use tsgen_model::ValueKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderCount {
    pub placeholder: String,
    pub kind: ValueKind,
    pub count: usize,
    /// Where each counted substitution happened, rendered for display.
    pub locations: Vec<String>,
}

impl PlaceholderCount {
    pub(crate) fn record(&mut self, location: &ParagraphLocation) {
        self.count += 1;
        self.locations.push(location.to_string());
    }
}

/// Counts for every resolved placeholder, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubstitutionReport {
    pub counts: Vec<PlaceholderCount>,
    pub tables_created: usize,
}

impl SubstitutionReport {
    pub fn count(&self, placeholder: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|entry| entry.placeholder == placeholder)
            .map(|entry| entry.count)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|entry| entry.count).sum()
    }

    /// Resolved placeholders never encountered in the document.
    pub fn missing(&self) -> Vec<String> {
        self.counts
            .iter()
            .filter(|entry| entry.count == 0)
            .map(|entry| entry.placeholder.clone())
            .collect()
    }
}
