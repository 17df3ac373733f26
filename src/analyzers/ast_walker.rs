use crate::analyzers::directives::DirectiveExtractor;
use crate::core::{AstNodeSummary, Directive, FunctionDecl, IncludeDecl, ParamDecl, VariableDecl};
use crate::parsing::{NodeKind, TreeNode};
use log::debug;
use std::collections::HashSet;

/// Bound on traversal depth; guards against degenerate or adversarial trees.
const MAX_DEPTH: usize = 100;

/// Everything one traversal of a parse tree produces.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub nodes: Vec<AstNodeSummary>,
    pub functions: Vec<FunctionDecl>,
    pub variables: Vec<VariableDecl>,
    pub includes: Vec<IncludeDecl>,
    /// Directives reconstructed from token streams, deduplicated by line.
    pub token_directives: Vec<Directive>,
    /// One entry per node whose inspection failed; the node and its subtree
    /// were skipped, the rest of the traversal continued.
    pub anomalies: Vec<String>,
}

/// Pre-order depth-first traversal of the external parse tree, children in
/// tree-reported order. A bad node never aborts the whole-file analysis.
pub struct AstWalker {
    max_depth: usize,
}

impl AstWalker {
    pub fn new() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }

    pub fn walk(&self, root: &TreeNode, directives: &DirectiveExtractor) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();
        let mut pragma_lines = HashSet::new();
        self.visit(root, false, 0, directives, &mut pragma_lines, &mut outcome);
        outcome
    }

    fn visit(
        &self,
        node: &TreeNode,
        parent_is_root: bool,
        depth: usize,
        directives: &DirectiveExtractor,
        pragma_lines: &mut HashSet<usize>,
        outcome: &mut WalkOutcome,
    ) {
        if depth > self.max_depth {
            return;
        }

        if let Err(reason) = inspect_node(node, parent_is_root, directives, pragma_lines, outcome)
        {
            debug!(
                "skipping {} node at {}: {}",
                node.kind.name(),
                node.location(),
                reason
            );
            outcome
                .anomalies
                .push(format!("{} at {}: {}", node.kind.name(), node.location(), reason));
            return;
        }

        let is_root = node.kind == NodeKind::TranslationUnit;
        for child in &node.children {
            self.visit(child, is_root, depth + 1, directives, pragma_lines, outcome);
        }
    }
}

impl Default for AstWalker {
    fn default() -> Self {
        Self::new()
    }
}

fn inspect_node(
    node: &TreeNode,
    parent_is_root: bool,
    directives: &DirectiveExtractor,
    pragma_lines: &mut HashSet<usize>,
    outcome: &mut WalkOutcome,
) -> Result<(), String> {
    match node.kind {
        NodeKind::FunctionDecl => {
            let function = extract_function(node)?;
            outcome.functions.push(function);
        }
        NodeKind::VarDecl => {
            let variable = extract_variable(node, parent_is_root)?;
            outcome.variables.push(variable);
        }
        NodeKind::InclusionDirective => {
            let include = extract_include(node)?;
            outcome.includes.push(include);
        }
        _ => {}
    }

    outcome.nodes.push(AstNodeSummary {
        kind: node.kind.name().to_string(),
        spelling: node.spelling.clone(),
        location: node.location(),
        children_count: node.children.len(),
        has_openmp: contains_openmp(node),
    });

    scan_tokens_for_pragmas(node, directives, pragma_lines, outcome);
    Ok(())
}

fn contains_openmp(node: &TreeNode) -> bool {
    if node.spelling.to_lowercase().contains("omp") {
        return true;
    }
    node.tokens
        .iter()
        .any(|t| t.spelling.to_lowercase().contains("omp"))
}

fn extract_function(node: &TreeNode) -> Result<FunctionDecl, String> {
    let return_type = node
        .result_type
        .clone()
        .ok_or("function declaration without result type")?;

    let mut parameters = Vec::new();
    for child in &node.children {
        if child.kind == NodeKind::ParmDecl {
            let type_name = child
                .type_name
                .clone()
                .ok_or("parameter declaration without type")?;
            parameters.push(ParamDecl {
                name: child.spelling.clone(),
                type_name,
            });
        }
    }

    Ok(FunctionDecl {
        name: node.spelling.clone(),
        location: node.location(),
        return_type,
        parameters,
        has_openmp: contains_openmp(node),
    })
}

fn extract_variable(node: &TreeNode, parent_is_root: bool) -> Result<VariableDecl, String> {
    let type_name = node
        .type_name
        .clone()
        .ok_or("variable declaration without type")?;

    Ok(VariableDecl {
        name: node.spelling.clone(),
        type_name,
        location: node.location(),
        is_global: parent_is_root,
    })
}

fn extract_include(node: &TreeNode) -> Result<IncludeDecl, String> {
    if node.spelling.is_empty() {
        return Err("inclusion directive without target".to_string());
    }

    let is_system = node
        .source_path
        .as_ref()
        .map(|p| p.starts_with("/usr"))
        .unwrap_or(false);

    Ok(IncludeDecl {
        file: node.spelling.clone(),
        location: node.location(),
        is_system,
    })
}

/// Looks for the literal `#`, `pragma`, `omp` token sequence on one source
/// line and forwards the whole line's tokens as reconstructed pragma text.
fn scan_tokens_for_pragmas(
    node: &TreeNode,
    directives: &DirectiveExtractor,
    pragma_lines: &mut HashSet<usize>,
    outcome: &mut WalkOutcome,
) {
    let tokens = &node.tokens;
    for i in 0..tokens.len() {
        if tokens[i].spelling != "#"
            || tokens.get(i + 1).map(|t| t.spelling.as_str()) != Some("pragma")
            || tokens.get(i + 2).map(|t| t.spelling.as_str()) != Some("omp")
        {
            continue;
        }

        let line = tokens[i].line;
        // Ancestor nodes carry the same token stream; record each pragma
        // line once.
        if !pragma_lines.insert(line) {
            continue;
        }

        let text: Vec<&str> = tokens[i..]
            .iter()
            .take_while(|t| t.line == line)
            .map(|t| t.spelling.as_str())
            .collect();

        if let Some(directive) = directives.parse_token_text(&text.join(" "), line) {
            outcome.token_directives.push(directive);
        }
    }
}
