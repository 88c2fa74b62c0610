//! Tree navigation primitives shared by the rules
//!
//! Everything here is a pure function over the read-only tree: descendant
//! search, argument lookup, the bounded walk from a modifier chain to the
//! element consuming it, and the `semantics { contentDescription = ... }`
//! check.

use super::base::RuleContext;
use crate::syntax::{Argument, Call, Node, NodeId, SyntaxTree};

/// Conventional parameter carrying an element's modifier chain
pub const MODIFIER_PARAM: &str = "modifier";

/// Accessibility description property / parameter
pub const CONTENT_DESCRIPTION: &str = "contentDescription";

/// Spoken action label of `clickable`
pub const ON_CLICK_LABEL: &str = "onClickLabel";

pub const CLICKABLE_FUNCTIONS: &[&str] = &["clickable"];

/// Functions that attach accessibility metadata through an assignment block
pub const SEMANTICS_FUNCTIONS: &[&str] = &["semantics", "clearAndSetSemantics"];

/// How many structural ancestors [`find_owning_call`] inspects.
///
/// Keeps the upward walk cheap and stops it before it reaches calls that have
/// nothing to do with the modifier; raising it finds owners behind more
/// wrapping at the cost of more unrelated matches.
pub const DEFAULT_MAX_OWNER_HOPS: usize = 4;

/// Package prefix of the UI toolkit whose components the rules know about
pub const COMPOSE_PACKAGE_PREFIX: &str = "androidx.compose.";

/// Pre-order iterator over the calls below (and including) a node
pub struct DescendantCalls<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for DescendantCalls<'t> {
    type Item = (NodeId, &'t Call);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let mut children = self.tree.children(id);
            children.reverse();
            self.stack.extend(children);
            if let Some(call) = self.tree.call(id) {
                return Some((id, call));
            }
        }
        None
    }
}

/// Every call in the subtree rooted at `node`, ancestors before descendants
pub fn collect_descendant_calls(tree: &SyntaxTree, node: NodeId) -> DescendantCalls<'_> {
    DescendantCalls {
        tree,
        stack: vec![node],
    }
}

/// Argument named `name`, else the unnamed argument at `positional_index`
pub fn find_named_or_positional_arg<'t>(
    tree: &'t SyntaxTree,
    call: &'t Call,
    name: &str,
    positional_index: Option<usize>,
) -> Option<&'t Argument> {
    if let Some(named) = find_named_arg(tree, call, name) {
        return Some(named);
    }
    let index = positional_index?;
    tree.arguments(call)
        .nth(index)
        .filter(|arg| arg.is_positional())
}

pub fn find_named_arg<'t>(tree: &'t SyntaxTree, call: &'t Call, name: &str) -> Option<&'t Argument> {
    tree.arguments(call).find(|arg| arg.is_named(name))
}

/// Value of the named argument, `None` if absent or malformed
pub fn named_arg_value(tree: &SyntaxTree, call: &Call, name: &str) -> Option<NodeId> {
    find_named_arg(tree, call, name).and_then(|arg| arg.value)
}

/// Topmost node of the fluent chain that `node` is part of
fn chain_root(ctx: &RuleContext<'_>, node: NodeId) -> NodeId {
    ctx.ancestors(node)
        .take_while(|ancestor| matches!(ctx.node(*ancestor), Node::Chain(_)))
        .last()
        .unwrap_or(node)
}

/// Element call that consumes the modifier chain containing `node`
///
/// Climbs out of the chain, then inspects at most `max_hops` ancestors for an
/// argument named `modifier` or an unnamed argument. Returns the call owning
/// that argument, or `None` when the budget runs out or the walk leaves the
/// tree.
pub fn find_owning_call(ctx: &RuleContext<'_>, node: NodeId, max_hops: usize) -> Option<NodeId> {
    let tree = ctx.tree();
    let mut current = chain_root(ctx, node);
    for _ in 0..max_hops {
        let parent = ctx.parent(current)?;
        if let Some(arg) = tree.argument(parent) {
            if arg.is_named(MODIFIER_PARAM) || arg.is_positional() {
                return ctx.parent(parent).filter(|owner| tree.call(*owner).is_some());
            }
        }
        current = parent;
    }
    None
}

/// How a description-like value reads statically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionValue {
    Null,
    Empty,
    /// Non-empty literal, template or any other expression
    Present,
}

pub fn classify_description(tree: &SyntaxTree, value: NodeId) -> DescriptionValue {
    match tree.node(value) {
        Node::NullLiteral => DescriptionValue::Null,
        Node::StringLiteral(s) if s.is_empty() => DescriptionValue::Empty,
        _ => DescriptionValue::Present,
    }
}

/// Whether `modifier_expr` contains a semantics call assigning a usable
/// `contentDescription`
pub fn has_semantic_description(tree: &SyntaxTree, modifier_expr: NodeId) -> bool {
    semantic_description(tree, modifier_expr) == Some(true)
}

/// Like [`has_semantic_description`], but `None` when no semantics call
/// describes the element and one of them assigns `contentDescription`
/// without a value.
pub fn semantic_description(tree: &SyntaxTree, modifier_expr: NodeId) -> Option<bool> {
    let verdicts = collect_descendant_calls(tree, modifier_expr)
        .filter(|(_, call)| SEMANTICS_FUNCTIONS.contains(&call.callee.as_str()))
        .map(|(_, call)| semantics_block_describes(tree, call));
    first_description(verdicts)
}

/// `Some(true)` wins, then any malformed `None`, else `Some(false)`
fn first_description(verdicts: impl Iterator<Item = Option<bool>>) -> Option<bool> {
    let mut malformed = false;
    for verdict in verdicts {
        match verdict {
            Some(true) => return Some(true),
            Some(false) => {}
            None => malformed = true,
        }
    }
    (!malformed).then_some(false)
}

fn semantics_block_describes(tree: &SyntaxTree, semantics: &Call) -> Option<bool> {
    // Trailing lambda, or a lambda passed as an ordinary argument
    let block = semantics.trailing_block.or_else(|| {
        tree.arguments(semantics)
            .filter_map(|arg| arg.value)
            .find(|value| tree.block(*value).is_some())
    });
    let Some(block) = block.and_then(|id| tree.block(id)) else {
        return Some(false);
    };

    let assignments = block.statements.iter().filter_map(|stmt| match tree.node(*stmt) {
        Node::Assignment(assign) if tree.identifier(assign.target) == Some(CONTENT_DESCRIPTION) => {
            Some(assign.value.map(|v| classify_description(tree, v) == DescriptionValue::Present))
        }
        _ => None,
    });
    first_description(assignments)
}

/// Whether the call's named `modifier` argument declares a semantic
/// description
///
/// `None` when the tree is malformed at that spot: the argument has no value,
/// or a `contentDescription` assignment inside it has none. Rules abstain
/// then instead of guessing.
pub fn modifier_has_semantic_description(tree: &SyntaxTree, call: &Call) -> Option<bool> {
    match find_named_arg(tree, call, MODIFIER_PARAM) {
        None => Some(false),
        Some(arg) => semantic_description(tree, arg.value?),
    }
}

/// Which of `names` the call invokes, if any
///
/// With symbol resolution the resolved name must live in the toolkit package
/// and end in one of `names`, so user functions that merely share a name
/// (`com.example.Text`) do not match. Without resolution, or when the call
/// is unresolved, the bare callee text is compared; that fallback cannot tell
/// shadowed or aliased imports apart and may report calls to unrelated
/// functions of the same name.
pub fn matched_callee(
    ctx: &RuleContext<'_>,
    id: NodeId,
    call: &Call,
    names: &[&'static str],
) -> Option<&'static str> {
    match ctx.resolve(id) {
        Some(fqn) => {
            let simple = fqn.rsplit('.').next().unwrap_or(fqn);
            if !fqn.starts_with(COMPOSE_PACKAGE_PREFIX) {
                return None;
            }
            names.iter().copied().find(|name| *name == simple)
        }
        None => names.iter().copied().find(|name| *name == call.callee),
    }
}

pub fn callee_is(ctx: &RuleContext<'_>, id: NodeId, call: &Call, names: &[&'static str]) -> bool {
    matched_callee(ctx, id, call, names).is_some()
}
