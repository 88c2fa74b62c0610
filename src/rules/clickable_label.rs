//! Clickable modifier without `onClickLabel`
//!
//! ```text
//! Modifier.clickable { open() }                          // reported
//! Modifier.clickable(onClickLabel = "Open") { open() }   // ok
//! ```

use super::base::{Rule, RuleContext};
use super::navigation::{callee_is, find_named_arg, CLICKABLE_FUNCTIONS, ON_CLICK_LABEL};
use crate::models::Finding;
use crate::syntax::{Call, NodeId};

pub const ID: &str = "clickable-modifier-missing-on-click-label";

pub struct ClickableLabelRule;

impl Rule for ClickableLabelRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "A .clickable modifier should pass onClickLabel so screen readers can announce what the click does"
    }

    fn check(&self, id: NodeId, call: &Call, ctx: &RuleContext<'_>) -> Vec<Finding> {
        if !callee_is(ctx, id, call, CLICKABLE_FUNCTIONS)
            || find_named_arg(ctx.tree(), call, ON_CLICK_LABEL).is_some()
        {
            return vec![];
        }

        vec![Finding::new(
            ID,
            self.default_severity(),
            call.span,
            "The .clickable modifier is missing an onClickLabel. Provide a meaningful label, \
             e.g. onClickLabel = \"Open settings\".",
        )]
    }
}
