//! # Rule
//!
//! A [`Rule`] is one lexical pattern: a regular expression, the [`Priority`]
//! it has against the other rules of its order, and whether the text it
//! matches ends up in the token sequence.

use crate::error::{Error, Result};
use regex::Regex;
use regex_automata::{meta, Anchored, Input};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;


/// # Summary
///
/// The precedence of a rule relative to the other rules of the *same* order.
/// Within an order, rules are tried from the highest priority to the lowest.
///
/// `Immediate > Natural > End`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    End,
    #[default]
    Natural,
    Immediate,
}

impl Priority {
    /// The numeric level of the priority: 3 for `Immediate`, 2 for `Natural`, 1 for `End`.
    pub fn level(self) -> u8 {
        match self {
            Priority::Immediate => 3,
            Priority::Natural => 2,
            Priority::End => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "immediate" => Ok(Priority::Immediate),
            "natural" => Ok(Priority::Natural),
            "end" => Ok(Priority::End),
            other => Err(format!(
                "unknown priority `{}`, expected one of immediate, natural, end",
                other
            )),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|error| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: match error {
            regex::Error::Syntax(msg) => msg,
            regex::Error::CompiledTooBig(size) => {
                format!("size too big (maximum is {})", size)
            }
            _ => String::from("unknown regex error"),
        },
    })
}

fn compile_matcher(pattern: &str) -> Result<meta::Regex> {
    meta::Regex::new(pattern).map_err(|error| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: error.to_string(),
    })
}

/// # Summary
///
/// `Rule` is an immutable lexical pattern. It is built once, validated at
/// construction, and then shared (typically as an `Arc<Rule>`) by the rule
/// sets it is inserted in.
///
/// # Methods
///
/// `new`, `with_priority`, `with_capture`, `full`: build a rule, failing if the pattern is not a valid regex
/// `named`: attach a name to the rule
/// `match_at`: match the rule at an exact position of an input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RuleDefinition", into = "RuleDefinition")]
pub struct Rule {
    pattern: String,
    regex: Regex,
    matcher: meta::Regex,
    priority: Priority,
    capture: bool,
    name: Option<String>,
}

impl Rule {
    /// Build a `Natural`, capturing rule.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::full(pattern, Priority::default(), true)
    }

    /// Build a capturing rule with the given priority.
    pub fn with_priority(pattern: &str, priority: Priority) -> Result<Self> {
        Self::full(pattern, priority, true)
    }

    /// Build a `Natural` rule, capturing or not.
    pub fn with_capture(pattern: &str, capture: bool) -> Result<Self> {
        Self::full(pattern, Priority::default(), capture)
    }

    /// Build a rule from all of its attributes.
    pub fn full(pattern: &str, priority: Priority, capture: bool) -> Result<Self> {
        let regex = compile(pattern)?;
        let matcher = compile_matcher(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            matcher,
            priority,
            capture,
            name: None,
        })
    }

    /// Attach a name to the rule.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Return the source text of the pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Return the compiled pattern.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Return whether matches of this rule are kept in the token sequence.
    pub fn is_capturable(&self) -> bool {
        self.capture
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name of the rule if it has one, its pattern otherwise.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.pattern)
    }

    /// Match the rule against `input`, starting exactly at byte offset `pos`.
    /// Matches that would start further in the input are not reported.
    ///
    /// The input before `pos` is not visible to the pattern, so `^` and `\b`
    /// treat `pos` as the start of the text.
    pub fn match_at<'text>(&self, input: &'text str, pos: usize) -> Option<&'text str> {
        let rest = input.get(pos..)?;
        self.matcher
            .find(Input::new(rest).anchored(Anchored::Yes))
            .and_then(|found| rest.get(found.range()))
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.priority == other.priority
            && self.capture == other.capture
            && self.name == other.name
    }
}

impl Eq for Rule {}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "[{}({}) {}]", self.pattern, self.priority, self.capture)
        } else {
            write!(f, "{}({})", self.pattern, self.priority)
        }
    }
}

/// # Summary
///
/// The serialized form of a [`Rule`], as found in JSON rule files.
/// `priority` defaults to `natural` and `capture` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub pattern: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "capture_default")]
    pub capture: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn capture_default() -> bool {
    true
}

impl TryFrom<RuleDefinition> for Rule {
    type Error = Error;

    fn try_from(definition: RuleDefinition) -> Result<Self> {
        let rule = Rule::full(&definition.pattern, definition.priority, definition.capture)?;
        Ok(match definition.name {
            Some(name) => rule.named(name),
            None => rule,
        })
    }
}

impl From<Rule> for RuleDefinition {
    fn from(rule: Rule) -> Self {
        Self {
            pattern: rule.pattern,
            priority: rule.priority,
            capture: rule.capture,
            name: rule.name,
        }
    }
}
