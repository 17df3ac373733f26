use crate::core::Directive;
use once_cell::sync::Lazy;
use regex::Regex;

static PRAGMA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#pragma\s+omp\b\s*(.*)$").unwrap());

/// Recognizes `#pragma omp <name> <clause>*`.
///
/// Two paths feed extraction: a line-oriented scan over raw text, which is
/// authoritative for line and column, and token-reconstructed text from the
/// tree walker, which catches pragmas the text scan cannot see (macro
/// expansions) and reports column -1. Clause tokens are stored exactly as
/// split on whitespace; no clause grammar is applied.
pub struct DirectiveExtractor;

impl DirectiveExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Scans raw source text, one match per line, in top-to-bottom order.
    /// Line numbers are 1-based indices into the input's line sequence.
    pub fn extract_from_text(&self, content: &str) -> Vec<Directive> {
        let mut directives = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if let Some(captures) = PRAGMA_RE.captures(line) {
                let rest = captures.get(1).map(|m| m.as_str()).unwrap_or("").trim();
                let mut parts = rest.split_whitespace();
                // A bare "#pragma omp" is a malformed directive, kept with an
                // empty name rather than dropped.
                let name = parts.next().unwrap_or("").to_string();
                let clauses: Vec<String> = parts.map(str::to_string).collect();

                directives.push(Directive {
                    name,
                    clauses,
                    line_number: idx + 1,
                    column: line.find("#pragma").map(|c| c as i32).unwrap_or(-1),
                    full_text: line.trim().to_string(),
                });
            }
        }

        directives
    }

    /// Parses pragma text reconstructed from a node's token stream, e.g.
    /// `# pragma omp parallel private ( x )`. Returns None unless the text
    /// starts with the `#`, `pragma`, `omp` token sequence.
    pub fn parse_token_text(&self, text: &str, line_number: usize) -> Option<Directive> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        if parts.len() < 3 || parts[0] != "#" || parts[1] != "pragma" || parts[2] != "omp" {
            return None;
        }

        let name = parts.get(3).copied().unwrap_or("").to_string();
        let clauses: Vec<String> = parts.iter().skip(4).map(|s| s.to_string()).collect();

        Some(Directive {
            name,
            clauses,
            line_number,
            column: -1,
            full_text: parts.join(" "),
        })
    }
}

impl Default for DirectiveExtractor {
    fn default() -> Self {
        Self::new()
    }
}
