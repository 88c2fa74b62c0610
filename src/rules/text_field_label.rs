//! Text input without a label
//!
//! `TextField` / `OutlinedTextField` need either a `label` or a
//! `contentDescription` declared through `Modifier.semantics`.

use super::base::{Rule, RuleContext};
use super::navigation::{find_named_arg, matched_callee, modifier_has_semantic_description};
use crate::models::Finding;
use crate::syntax::{Call, NodeId};
use tracing::trace;

pub const ID: &str = "text-field-missing-accessibility-label";

pub const TEXT_FIELD_COMPONENTS: &[&str] = &["TextField", "OutlinedTextField"];

const LABEL_PARAM: &str = "label";

pub struct TextFieldLabelRule;

impl Rule for TextFieldLabelRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "TextField/OutlinedTextField need a label parameter or a contentDescription via \
         Modifier.semantics so screen readers can announce the field's purpose"
    }

    fn check(&self, id: NodeId, call: &Call, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let Some(component) = matched_callee(ctx, id, call, TEXT_FIELD_COMPONENTS) else {
            return vec![];
        };
        let tree = ctx.tree();
        if find_named_arg(tree, call, LABEL_PARAM).is_some() {
            return vec![];
        }
        match modifier_has_semantic_description(tree, call) {
            Some(false) => {}
            Some(true) => return vec![],
            None => {
                trace!("{component} modifier without a value, skipping");
                return vec![];
            }
        }

        vec![Finding::new(
            ID,
            self.default_severity(),
            call.span,
            format!(
                "This {component} needs either a label parameter or a valid contentDescription \
                 via Modifier.semantics."
            ),
        )]
    }
}
