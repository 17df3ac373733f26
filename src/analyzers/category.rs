use crate::core::{Directive, TestCategory};

/// Category rules in evaluation priority order; first match wins.
static CATEGORY_RULES: &[(TestCategory, &[&str])] = &[
    (TestCategory::Parallel, &["parallel"]),
    (TestCategory::Worksharing, &["for", "sections", "single"]),
    (TestCategory::Target, &["target"]),
    (TestCategory::Synchronization, &["atomic", "critical", "barrier"]),
    (TestCategory::Simd, &["simd"]),
    (TestCategory::Task, &["task"]),
];

/// Total, deterministic mapping to the closed category set. Each rule is an
/// OR over three lower-cased signals (filename, directive names, body text)
/// against its keyword list; GENERAL is the unconditional fallback.
pub fn categorize_test(file_name: &str, directives: &[Directive], content: &str) -> TestCategory {
    let name_lower = file_name.to_lowercase();
    let content_lower = content.to_lowercase();
    let directive_names: Vec<String> = directives.iter().map(|d| d.name.to_lowercase()).collect();

    for (category, keywords) in CATEGORY_RULES {
        let hit = keywords.iter().any(|kw| {
            name_lower.contains(kw)
                || directive_names.iter().any(|name| name.contains(kw))
                || content_lower.contains(kw)
        });
        if hit {
            return *category;
        }
    }

    TestCategory::General
}
