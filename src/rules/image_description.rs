//! `contentDescription` policy for the foundation `Image`
//!
//! The target is identified by its resolved symbol, never by the bare name, so
//! this rule only runs for files analyzed with type information.
//!
//! | `contentDescription` | Finding |
//! |---|---|
//! | absent | warning: add a description, or `null` if decorative |
//! | `null` | info: fine for decorative images |
//! | `""` | warning: use `null` or a real description |

use super::base::{Rule, RuleContext};
use super::navigation::{classify_description, find_named_arg, DescriptionValue, CONTENT_DESCRIPTION};
use crate::models::{Finding, Severity};
use crate::syntax::{Call, NodeId};

pub const ID: &str = "image-content-description";

/// Fully-qualified name of the image primitive this rule inspects
pub const IMAGE_SYMBOL: &str = "androidx.compose.foundation.Image";

pub struct ImageDescriptionRule;

impl Rule for ImageDescriptionRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "Image should have a meaningful contentDescription; use null for decorative images, \
         never an empty string"
    }

    fn requires_symbol_resolution(&self) -> bool {
        true
    }

    fn check(&self, id: NodeId, call: &Call, ctx: &RuleContext<'_>) -> Vec<Finding> {
        if ctx.resolve(id) != Some(IMAGE_SYMBOL) {
            return vec![];
        }
        let tree = ctx.tree();

        let finding = match find_named_arg(tree, call, CONTENT_DESCRIPTION) {
            None => Finding::new(
                ID,
                Severity::Warning,
                call.span,
                "This Image is missing the contentDescription parameter. Add a meaningful \
                 description, or pass null if the image is purely decorative.",
            ),
            Some(arg) => {
                let Some(value) = arg.value else {
                    return vec![];
                };
                match classify_description(tree, value) {
                    DescriptionValue::Present => return vec![],
                    DescriptionValue::Null => Finding::new(
                        ID,
                        Severity::Info,
                        call.span,
                        "This Image sets contentDescription to null. That is correct only if \
                         the image is decorative.",
                    ),
                    DescriptionValue::Empty => Finding::new(
                        ID,
                        Severity::Warning,
                        call.span,
                        "This Image sets contentDescription to an empty string (\"\"). Use null \
                         for decorative images or provide a meaningful description.",
                    ),
                }
            }
        };
        vec![finding]
    }
}
