//! a11ylint - accessibility linter for declarative UI code
//!
//! Reads syntax trees of call-based UI programs and reports elements that
//! assistive technologies cannot describe. The pieces:
//!
//! - [`syntax`]: the tree model and the JSON dump loader
//! - [`rules`]: navigation helpers, the descriptiveness check, the rules and
//!   the engine that drives them
//! - [`config`]: `a11ylint.toml` loading and the resolved [`config::RuleSet`]
//! - [`reporters`]: text, JSON and SARIF output

pub mod cli;
pub mod config;
pub mod models;
pub mod reporters;
pub mod rules;
pub mod syntax;
