//! Base rule trait and per-file context
//!
//! This module defines the core abstractions for accessibility rules:
//! - `Rule` trait that all rules must implement
//! - `RuleContext`, the read-only view of one file shared by all rules

use crate::models::{Finding, Severity};
use crate::syntax::{Call, Node, NodeId, SymbolResolver, SyntaxTree};

/// Trait for all accessibility rules
///
/// A rule is invoked once for every call node of a file and inspects only that
/// node plus the read-only [`RuleContext`]. Rules hold nothing but immutable
/// configuration, so one instance is shared by all worker threads.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyRule;
///
/// impl Rule for MyRule {
///     fn id(&self) -> &'static str {
///         "my-rule"
///     }
///
///     fn description(&self) -> &'static str {
///         "Flags calls named `Foo`"
///     }
///
///     fn check(&self, id: NodeId, call: &Call, ctx: &RuleContext<'_>) -> Vec<Finding> {
///         if call.callee != "Foo" {
///             return vec![];
///         }
///         vec![Finding::new(self.id(), self.default_severity(), call.span, "found Foo")]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Stable kebab-case identifier, used in configuration and reports
    fn id(&self) -> &'static str;

    /// Human-readable description of what this rule finds
    fn description(&self) -> &'static str;

    /// Severity of findings when configuration does not override it
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Whether the rule cannot run without a [`SymbolResolver`]
    ///
    /// The engine skips such rules for files without resolution and records
    /// the skip instead of running them.
    fn requires_symbol_resolution(&self) -> bool {
        false
    }

    /// Option keys accepted under `[rules.<id>.options]`
    fn accepted_options(&self) -> &'static [&'static str] {
        &[]
    }

    /// Evaluate the rule at one call node
    ///
    /// Returning an empty vector covers both "passes" and "cannot classify
    /// this node"; rules never fail.
    fn check(&self, id: NodeId, call: &Call, ctx: &RuleContext<'_>) -> Vec<Finding>;
}

/// Read-only view of one analyzed file
///
/// Built once per file by the engine: the tree, a parent index over it and the
/// optional symbol resolver supplied by the host.
pub struct RuleContext<'a> {
    tree: &'a SyntaxTree,
    parents: Vec<Option<NodeId>>,
    resolver: Option<&'a dyn SymbolResolver>,
}

impl<'a> RuleContext<'a> {
    pub fn new(tree: &'a SyntaxTree, resolver: Option<&'a dyn SymbolResolver>) -> Self {
        let mut parents = vec![None; tree.len()];
        for id in tree.ids() {
            for child in tree.children(id) {
                parents[child.index()] = Some(id);
            }
        }
        Self {
            tree,
            parents,
            resolver,
        }
    }

    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    pub fn node(&self, id: NodeId) -> &'a Node {
        self.tree.node(id)
    }

    /// Structural parent, `None` for the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// Ancestors from the direct parent up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    pub fn resolver(&self) -> Option<&'a dyn SymbolResolver> {
        self.resolver
    }

    pub fn has_symbol_resolution(&self) -> bool {
        self.resolver.is_some()
    }

    /// Fully-qualified name of the function a call invokes, if known
    pub fn resolve(&self, call: NodeId) -> Option<&'a str> {
        self.resolver.and_then(|r| r.resolve(call))
    }
}
