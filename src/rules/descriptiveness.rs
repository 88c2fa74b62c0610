//! Decides whether a block of child content already tells an assistive
//! reader what an interactive container does.
//!
//! Components the engine does not recognize are assumed to manage their own
//! accessibility and count as descriptive. This keeps custom components from
//! being reported, and it is a known source of missed findings.

use super::base::RuleContext;
use super::navigation::{
    callee_is, classify_description, find_named_or_positional_arg,
    modifier_has_semantic_description, named_arg_value, DescriptionValue, CONTENT_DESCRIPTION,
};
use crate::syntax::{Call, Node, NodeId};

/// Components rendering a text label
pub const TEXT_COMPONENTS: &[&str] = &["Text"];

/// Image-like primitives described through `contentDescription`
pub const IMAGE_COMPONENTS: &[&str] = &["Image", "Icon"];

/// Containers with no semantics of their own; their content is inspected instead
pub const LAYOUT_WRAPPERS: &[&str] = &[
    "Box",
    "Row",
    "Column",
    "Surface",
    "LazyRow",
    "LazyColumn",
    "Spacer",
    "Divider",
];

/// Whether a block (or a single call) is self-describing
pub fn is_self_describing(ctx: &RuleContext<'_>, node: NodeId) -> bool {
    let children: &[NodeId] = match ctx.node(node) {
        Node::Block(block) => &block.statements,
        Node::Call(_) => std::slice::from_ref(&node),
        _ => &[],
    };
    children.iter().any(|child| child_describes(ctx, *child))
}

fn child_describes(ctx: &RuleContext<'_>, child: NodeId) -> bool {
    match ctx.node(child) {
        Node::Block(_) => is_self_describing(ctx, child),
        Node::Call(call) => {
            if is_call_descriptive(ctx, child, call) {
                return true;
            }
            if callee_is(ctx, child, call, LAYOUT_WRAPPERS) {
                return call
                    .trailing_block
                    .is_some_and(|content| is_self_describing(ctx, content));
            }
            true
        }
        _ => false,
    }
}

/// Whether one call carries a description by itself
pub fn is_call_descriptive(ctx: &RuleContext<'_>, id: NodeId, call: &Call) -> bool {
    let tree = ctx.tree();

    if callee_is(ctx, id, call, TEXT_COMPONENTS) {
        let text = find_named_or_positional_arg(tree, call, "text", Some(0)).and_then(|a| a.value);
        if text.is_some_and(|v| is_visible_text(ctx, v)) {
            return true;
        }
    }

    if callee_is(ctx, id, call, IMAGE_COMPONENTS)
        && named_arg_value(tree, call, CONTENT_DESCRIPTION)
            .is_some_and(|v| classify_description(tree, v) == DescriptionValue::Present)
    {
        return true;
    }

    // A malformed modifier describes nothing
    modifier_has_semantic_description(tree, call) == Some(true)
}

fn is_visible_text(ctx: &RuleContext<'_>, value: NodeId) -> bool {
    match ctx.node(value) {
        Node::StringLiteral(s) => !s.is_empty(),
        Node::NullLiteral => false,
        _ => true,
    }
}
