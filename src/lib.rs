//! # ordlex
//!
//! A tokenizer whose token shapes are chosen at runtime. Callers describe
//! tokens as regular-expression [`Rule`]s, group them into numbered orders in
//! a [`RuleSet`], and let the [`ScanEngine`] split inputs into [`Token`]s.
//!
//! ```rust
//! use ordlex::{Priority, Rule, RuleSet};
//!
//! let mut rules = RuleSet::skipping_whitespace()?;
//! rules
//!     .insert_at_current(Rule::with_priority(r"int|float", Priority::Immediate)?)
//!     .insert_at_current(Rule::new(r"[=;]")?)
//!     .advance_order()
//!     .insert_at_current(Rule::new(r"[0-9]+")?)
//!     .advance_order()
//!     .insert_at_current(Rule::new(r"[a-z_]+")?);
//! assert_eq!(
//!     rules.string_tokens("int a_b_c = 1;")?,
//!     vec!["int", "a_b_c", "=", "1", ";"],
//! );
//! # Ok::<(), ordlex::Error>(())
//! ```

pub mod builder;
pub mod error;
pub mod grammarparser;
pub mod lexer;
pub mod location;
pub mod rule;
pub mod stream;
#[cfg(test)]
mod test_utilities;

pub use error::{Error, Result};
pub use lexer::{scan, RuleSet, ScanEngine, Token};
pub use rule::{Priority, Rule};
