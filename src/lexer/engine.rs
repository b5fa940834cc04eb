use super::ruleset::RuleSet;
use crate::error::{Error, Result};
use crate::location::LocationBuilder;
use crate::rule::Rule;
use crate::stream::StringStream;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::path::Path;
use tracing::{debug, trace, warn};


/// Number of characters of unmatched input reported by a failed scan.
pub const INPUT_WINDOW_SIZE: usize = 25;

/// # Summary
///
/// `Token` is a piece of the input matched by a capturing rule. It borrows
/// both the input and the rule, which lives on in its [`RuleSet`].
///
/// # Methods
///
/// `text`: the matched substring
/// `rule`: the rule that matched it
/// `offset`: the byte offset of the match in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'rules, 'text> {
    text: &'text str,
    rule: &'rules Rule,
    offset: usize,
}

impl<'rules, 'text> Token<'rules, 'text> {
    pub fn new(text: &'text str, rule: &'rules Rule, offset: usize) -> Self {
        Self { text, rule, offset }
    }

    /// Return the matched substring.
    pub fn text(&self) -> &'text str {
        self.text
    }

    /// Return the rule that produced this token.
    pub fn rule(&self) -> &'rules Rule {
        self.rule
    }

    /// Return the byte offset of the token in the input.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Tokens serialize as `{"offset": .., "rule": .., "text": ..}`, `rule` being
/// the label of the rule.
impl Serialize for Token<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut token = serializer.serialize_struct("Token", 3)?;
        token.serialize_field("offset", &self.offset)?;
        token.serialize_field("rule", self.rule.label())?;
        token.serialize_field("text", self.text)?;
        token.end()
    }
}

impl fmt::Display for Token<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {:?})", self.rule.label(), self.text)
    }
}

/// # Summary
///
/// `ScanEngine` splits inputs into tokens according to a [`RuleSet`].
///
/// At each position, the rules are tried order by order, ascending, and
/// within an order from the highest priority to the lowest. The first rule
/// that matches exactly at the position wins, whatever the length of the
/// match. The position then moves past the match; the match becomes a
/// token only if its rule captures. The scan fails as soon as no rule
/// matches.
///
/// # Methods
///
/// `new`: build an engine over a rule set
/// `with_window`: set how much of the unmatched input a failure reports
/// `scan`: tokenize a string
/// `scan_stream`: tokenize a named [`StringStream`]
#[derive(Debug, Clone, Copy)]
pub struct ScanEngine<'rules> {
    rules: &'rules RuleSet,
    window: usize,
}

impl<'rules> ScanEngine<'rules> {
    pub fn new(rules: &'rules RuleSet) -> Self {
        Self {
            rules,
            window: INPUT_WINDOW_SIZE,
        }
    }

    /// Report at most `window` characters of unmatched input on failure.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Tokenize `input`. Failures are located in a file named `<input>`.
    pub fn scan<'text>(&self, input: &'text str) -> Result<Vec<Token<'rules, 'text>>> {
        self.scan_from(Path::new("<input>"), input)
    }

    /// Tokenize the whole content of `stream`, regardless of its cursor.
    pub fn scan_stream<'text>(
        &self,
        stream: &'text StringStream,
    ) -> Result<Vec<Token<'rules, 'text>>> {
        self.scan_from(&stream.origin(), stream.borrow())
    }

    fn scan_from<'text>(
        &self,
        origin: &Path,
        input: &'text str,
    ) -> Result<Vec<Token<'rules, 'text>>> {
        debug!(
            origin = %origin.display(),
            rules = self.rules.len(),
            length = input.len(),
            "scan started"
        );
        let mut tokens = Vec::new();
        let mut pos = 0;
        while pos < input.len() {
            let Some((text, rule)) = self.next_match(input, pos) else {
                let window = input[pos..].chars().take(self.window).collect::<String>();
                warn!(offset = pos, %window, "no rule matches");
                return Error::Tokenize {
                    offset: pos,
                    location: LocationBuilder::new(origin, input).at(pos),
                    window,
                }
                .err();
            };
            if text.is_empty() {
                warn!(offset = pos, rule = %rule, "rule matched the empty string");
                return Error::EmptyMatch {
                    pattern: rule.pattern().to_string(),
                    location: LocationBuilder::new(origin, input).at(pos),
                }
                .err();
            }
            trace!(offset = pos, rule = %rule, text, "matched");
            if rule.is_capturable() {
                tokens.push(Token::new(text, rule, pos));
            }
            pos += text.len();
        }
        debug!(tokens = tokens.len(), "scan finished");
        Ok(tokens)
    }

    /// Find the first rule matching at `pos`, and what it matches.
    pub fn next_match<'text>(
        &self,
        input: &'text str,
        pos: usize,
    ) -> Option<(&'text str, &'rules Rule)> {
        self.rules
            .rules()
            .find_map(|rule| rule.match_at(input, pos).map(|text| (text, rule)))
    }
}

/// Tokenize `input` with `rules`. This is a shorthand for `ScanEngine::new(rules).scan(input)`.
pub fn scan<'rules, 'text>(
    rules: &'rules RuleSet,
    input: &'text str,
) -> Result<Vec<Token<'rules, 'text>>> {
    ScanEngine::new(rules).scan(input)
}
