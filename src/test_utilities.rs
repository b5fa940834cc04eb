use crate::lexer::{RuleSet, Token};
use crate::rule::{Priority, Rule};
use std::sync::Arc;

/// `rule_set!` builds a [`RuleSet`] from `order => [rules]` groups, inserting
/// the rules in the order they are written.
macro_rules! rule_set {
    ($($order: expr => [$($rule: expr),* $(,)?]),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut set = $crate::lexer::RuleSet::new();
        $($(
            set.insert($order, $rule).unwrap();
        )*)*
        set
    }};
}

pub(crate) use rule_set;

pub(crate) fn rule(pattern: &str, priority: Priority, capture: bool) -> Arc<Rule> {
    Arc::new(Rule::full(pattern, priority, capture).unwrap())
}

/// Six capturing rules, all in order 0.
pub(crate) fn rule_set_a() -> RuleSet {
    let mut set = RuleSet::new();
    set.extend_at_current([
        rule("r1", Priority::Immediate, true),
        rule("r2", Priority::End, true),
        rule("r3", Priority::Natural, true),
        rule("r4", Priority::Immediate, true),
        rule("r5", Priority::End, true),
        rule("r6", Priority::Immediate, true),
    ]);
    set
}

/// The same six rules, split across three orders. `r4`, `r5` and `r6`
/// capture only if `capture_tail` is set.
pub(crate) fn rule_set_b(capture_tail: bool) -> RuleSet {
    let mut set = RuleSet::new();
    set.extend_at_current([
        rule("r1", Priority::Immediate, true),
        rule("r3", Priority::Natural, true),
    ])
    .advance_order()
    .extend_at_current([
        rule("r2", Priority::End, true),
        rule("r4", Priority::Immediate, capture_tail),
        rule("r5", Priority::End, capture_tail),
    ])
    .advance_order()
    .extend_at_current([rule("r6", Priority::Immediate, capture_tail)]);
    set
}

pub(crate) fn texts<'t>(tokens: &[Token<'_, 't>]) -> Vec<&'t str> {
    tokens.iter().map(Token::text).collect()
}
