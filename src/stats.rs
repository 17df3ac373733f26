use crate::core::AnalysisRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Corpus-level aggregation over emitted records: totals, counts grouped by
/// stage and category, and directive / diagnostic-kind frequency tables.
/// BTreeMap keys keep serialized output stable across runs.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AnalysisStats {
    pub total_records: usize,
    pub negative_tests: usize,
    pub total_diagnostics: usize,
    pub by_stage: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub directive_counts: BTreeMap<String, usize>,
    pub diagnostic_kind_counts: BTreeMap<String, usize>,
}

impl AnalysisStats {
    pub fn observe(&mut self, record: &AnalysisRecord) {
        self.total_records += 1;
        if record.negative_profile.is_negative_test {
            self.negative_tests += 1;
        }
        self.total_diagnostics += record.diagnostics.len();

        *self
            .by_stage
            .entry(record.compiler_stage.as_str().to_string())
            .or_default() += 1;
        *self
            .by_category
            .entry(record.test_category.as_str().to_string())
            .or_default() += 1;

        for directive in &record.directives {
            *self.directive_counts.entry(directive.name.clone()).or_default() += 1;
        }
        for diagnostic in &record.diagnostics {
            *self
                .diagnostic_kind_counts
                .entry(diagnostic.kind.as_str().to_string())
                .or_default() += 1;
        }
    }

    /// Directive names by descending frequency, name-ordered within ties.
    pub fn top_directives(&self, limit: usize) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> = self
            .directive_counts
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }
}
