//! Checkbox without a semantics description

use super::base::{Rule, RuleContext};
use super::navigation::{callee_is, modifier_has_semantic_description};
use crate::models::Finding;
use crate::syntax::{Call, NodeId};
use tracing::trace;

pub const ID: &str = "checkbox-missing-accessibility-label";

pub const CHECKBOX_COMPONENTS: &[&str] = &["Checkbox"];

pub struct CheckboxLabelRule;

impl Rule for CheckboxLabelRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "A Checkbox must have a contentDescription provided via Modifier.semantics"
    }

    fn check(&self, id: NodeId, call: &Call, ctx: &RuleContext<'_>) -> Vec<Finding> {
        if !callee_is(ctx, id, call, CHECKBOX_COMPONENTS) {
            return vec![];
        }
        match modifier_has_semantic_description(ctx.tree(), call) {
            Some(false) => {}
            Some(true) => return vec![],
            None => {
                trace!("Checkbox modifier without a value, skipping");
                return vec![];
            }
        }

        vec![Finding::new(
            ID,
            self.default_severity(),
            call.span,
            "This Checkbox is missing a contentDescription. Describe what it represents using \
             Modifier.semantics.",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{SourceNode, SyntaxTree};

    fn run(node: SourceNode) -> Vec<Finding> {
        let tree = SyntaxTree::from_source(&node);
        let ctx = RuleContext::new(&tree, None);
        let call = tree.call(tree.root()).expect("root call");
        CheckboxLabelRule.check(tree.root(), call, &ctx)
    }

    #[test]
    fn test_checkbox_without_semantics() {
        let findings = run(SourceNode::call("Checkbox")
            .arg("checked", SourceNode::opaque("checked"))
            .arg("modifier", SourceNode::modifier([SourceNode::call("padding")])));
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_checkbox_with_semantics() {
        let findings = run(SourceNode::call("Checkbox").arg(
            "modifier",
            SourceNode::modifier([SourceNode::call("semantics").content(vec![
                SourceNode::assign(
                    SourceNode::opaque("contentDescription"),
                    SourceNode::template("Accept $terms"),
                ),
            ])]),
        ));
        assert!(findings.is_empty());
    }

    #[test]
    fn test_positional_modifier_not_considered() {
        // Only the named `modifier` argument is inspected
        let findings = run(SourceNode::call("Checkbox").positional(SourceNode::modifier([
            SourceNode::call("semantics").content(vec![SourceNode::assign(
                SourceNode::opaque("contentDescription"),
                SourceNode::string("Accept"),
            )]),
        ])));
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_malformed_modifier_abstains() {
        let no_value = run(SourceNode::call("Checkbox").arg_missing("modifier"));
        assert!(no_value.is_empty());

        let unassigned = run(SourceNode::call("Checkbox").arg(
            "modifier",
            SourceNode::modifier([SourceNode::call("semantics").content(vec![
                SourceNode::assign_missing(SourceNode::opaque("contentDescription")),
            ])]),
        ));
        assert!(unassigned.is_empty());
    }
}
