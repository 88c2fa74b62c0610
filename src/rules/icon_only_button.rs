//! Button whose only content is an undescribed image
//!
//! ```text
//! IconButton(onClick = { }) { Icon(Icons.Default.Settings, contentDescription = null) }  // reported
//! IconButton(onClick = { }) { Icon(Icons.Default.Settings, contentDescription = "Settings") }
//! ```

use super::base::{Rule, RuleContext};
use super::descriptiveness::IMAGE_COMPONENTS;
use super::navigation::{
    callee_is, classify_description, find_named_arg, modifier_has_semantic_description,
    DescriptionValue, CONTENT_DESCRIPTION,
};
use crate::models::Finding;
use crate::syntax::{Call, NodeId};
use tracing::trace;

pub const ID: &str = "icon-only-button-missing-accessibility-label";

pub const BUTTON_COMPONENTS: &[&str] = &["Button", "IconButton"];

pub struct IconOnlyButtonRule;

impl IconOnlyButtonRule {
    /// The single image-like call making up the button's content
    fn single_image<'t>(ctx: &RuleContext<'t>, call: &Call) -> Option<&'t Call> {
        let tree = ctx.tree();
        let content = tree.block(call.trailing_block?)?;
        let [only] = content.statements.as_slice() else {
            return None;
        };
        let image = tree.call(*only)?;
        callee_is(ctx, *only, image, IMAGE_COMPONENTS).then_some(image)
    }
}

impl Rule for IconOnlyButtonRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "A Button/IconButton showing only an Image or Icon needs a contentDescription on the \
         image or a semantics description on the button"
    }

    fn check(&self, id: NodeId, call: &Call, ctx: &RuleContext<'_>) -> Vec<Finding> {
        if !callee_is(ctx, id, call, BUTTON_COMPONENTS) {
            return vec![];
        }
        let Some(image) = Self::single_image(ctx, call) else {
            return vec![];
        };
        let tree = ctx.tree();

        let undescribed = match find_named_arg(tree, image, CONTENT_DESCRIPTION) {
            None => true,
            Some(arg) => match arg.value {
                Some(value) => classify_description(tree, value) != DescriptionValue::Present,
                None => {
                    trace!("contentDescription without a value, skipping");
                    return vec![];
                }
            },
        };
        if !undescribed {
            return vec![];
        }
        match modifier_has_semantic_description(tree, call) {
            Some(false) => {}
            Some(true) => return vec![],
            None => {
                trace!("{} modifier without a value, skipping", call.callee);
                return vec![];
            }
        }

        vec![Finding::new(
            ID,
            self.default_severity(),
            call.span,
            format!(
                "This {} only shows an {} whose contentDescription is missing, null or empty. \
                 Describe the action with contentDescription for accessibility.",
                call.callee, image.callee
            ),
        )]
    }
}
