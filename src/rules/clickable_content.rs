//! Clickable element that is neither labelled nor self-describing
//!
//! A `clickable` without `onClickLabel` is fine when the element it is
//! attached to already shows text or a described image:
//!
//! ```text
//! Box(modifier = Modifier.clickable { }) { Text("Search") }   // ok
//! Box(modifier = Modifier.clickable { }) { Spacer() }         // reported
//! ```
//!
//! The element owning the modifier is found by a bounded upward walk
//! (`max_owner_hops`, default [`DEFAULT_MAX_OWNER_HOPS`]).

use super::base::{Rule, RuleContext};
use super::descriptiveness::is_self_describing;
use super::navigation::{
    callee_is, find_named_arg, find_owning_call, CLICKABLE_FUNCTIONS, DEFAULT_MAX_OWNER_HOPS,
    ON_CLICK_LABEL,
};
use crate::config::{ConfigError, RuleOptions};
use crate::models::Finding;
use crate::syntax::{Call, NodeId};
use tracing::trace;

pub const ID: &str = "clickable-element-missing-accessibility-label";

pub const MAX_OWNER_HOPS_OPTION: &str = "max_owner_hops";

/// Upper bound accepted for `max_owner_hops`
const MAX_OWNER_HOPS_LIMIT: i64 = 64;

pub struct ClickableContentRule {
    max_owner_hops: usize,
}

impl Default for ClickableContentRule {
    fn default() -> Self {
        Self {
            max_owner_hops: DEFAULT_MAX_OWNER_HOPS,
        }
    }
}

impl ClickableContentRule {
    pub fn new(max_owner_hops: usize) -> Self {
        Self { max_owner_hops }
    }

    pub fn from_options(options: &RuleOptions) -> Result<Self, ConfigError> {
        let Some(value) = options.get(MAX_OWNER_HOPS_OPTION) else {
            return Ok(Self::default());
        };
        match value.as_i64() {
            Some(hops) if (1..=MAX_OWNER_HOPS_LIMIT).contains(&hops) => Ok(Self::new(hops as usize)),
            _ => Err(ConfigError::InvalidOption {
                rule: ID.to_string(),
                option: MAX_OWNER_HOPS_OPTION.to_string(),
                reason: format!("expected an integer between 1 and {MAX_OWNER_HOPS_LIMIT}"),
            }),
        }
    }

    pub fn max_owner_hops(&self) -> usize {
        self.max_owner_hops
    }
}

impl Rule for ClickableContentRule {
    fn id(&self) -> &'static str {
        ID
    }

    fn description(&self) -> &'static str {
        "A clickable element needs an onClickLabel unless its content already describes it \
         (Text, or an Image/Icon with a contentDescription)"
    }

    fn accepted_options(&self) -> &'static [&'static str] {
        &[MAX_OWNER_HOPS_OPTION]
    }

    fn check(&self, id: NodeId, call: &Call, ctx: &RuleContext<'_>) -> Vec<Finding> {
        if !callee_is(ctx, id, call, CLICKABLE_FUNCTIONS)
            || find_named_arg(ctx.tree(), call, ON_CLICK_LABEL).is_some()
        {
            return vec![];
        }

        let Some(owner_id) = find_owning_call(ctx, id, self.max_owner_hops) else {
            trace!("no owning element within {} hops", self.max_owner_hops);
            return vec![Finding::new(
                ID,
                self.default_severity(),
                call.span,
                "The .clickable modifier is missing an onClickLabel and the element it belongs \
                 to could not be determined, so its content cannot stand in for a label. \
                 Provide an onClickLabel.",
            )];
        };
        let Some(owner) = ctx.tree().call(owner_id) else {
            return vec![];
        };

        if owner
            .trailing_block
            .is_some_and(|content| is_self_describing(ctx, content))
        {
            return vec![];
        }

        vec![Finding::new(
            ID,
            self.default_severity(),
            call.span,
            format!(
                "This clickable {} is missing an accessible label. Provide an onClickLabel in \
                 the .clickable modifier or make its content self-describing (Text, or an \
                 Image/Icon with its own contentDescription).",
                owner.callee
            ),
        )]
    }
}
