//! # Lexer
//!
//! This module contains the ordering structure and the scanning loop. The most useful are:
//!  - the [`RuleSet`], which groups [`Rule`]s into numbered orders, each sorted by priority.
//!    It is built once, then only read while scanning.
//!  - the [`ScanEngine`], which walks an input from left to right, asking the rule set at each
//!    position for the first rule that matches right there.
//!  - [`Token`] is the result of the tokenization: a slice of the input, and the rule that matched it.
//!
//!  [`Rule`]: crate::rule::Rule

mod engine;
mod ruleset;

pub use engine::{scan, ScanEngine, Token, INPUT_WINDOW_SIZE};
pub use ruleset::{OrderKey, RuleSet};
