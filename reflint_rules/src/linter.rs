//! Drives the registered rules over one file.

use reflint_core::{Diagnostic, LintResult};
use reflint_parser::{parse, SyntaxTree};
use reflint_semantic::{bind, traverse, ScopeGraph};

use crate::coupling::ParentChildCoupling;
use crate::rule::{DiagnosticSink, Rule, RuleContext};

/// The rule host. Holds the registered rules and runs them over parsed
/// files; rules are stateless, so one linter serves any number of files.
pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
}

impl Linter {
    /// A linter with the built-in rules registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(ParentChildCoupling)],
        }
    }

    /// Parse, bind and lint one source text.
    pub fn lint_source(&self, source: &str) -> LintResult<Vec<Diagnostic>> {
        let tree = parse(source)?;
        let graph = bind(&tree);
        Ok(self.lint_tree(&tree, &graph))
    }

    /// Lint an already analyzed tree. Diagnostics come back in stable
    /// span order with duplicates removed.
    #[must_use]
    pub fn lint_tree(&self, tree: &SyntaxTree, scopes: &ScopeGraph) -> Vec<Diagnostic> {
        let ctx = RuleContext { tree, scopes };
        let mut sink = DiagnosticSink::default();
        traverse(tree, tree.root(), |node| {
            for rule in &self.rules {
                rule.check(&ctx, node, &mut sink);
            }
        });
        sink.finish()
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}
