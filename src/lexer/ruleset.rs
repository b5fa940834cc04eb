use super::engine::{scan, Token};
use crate::error::{Error, Result};
use crate::rule::{Priority, Rule};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};


/// The key of an order. Orders are tried in ascending key order.
pub type OrderKey = i32;

/// # Summary
///
/// `RuleSet` holds rules grouped into numbered orders. Orders are tried in
/// ascending order of their key; within an order, rules are sorted by
/// descending [`Priority`], rules of equal priority keeping their insertion
/// order.
///
/// A rule set is built once, then handed read-only to the scan engine.
///
/// # Methods
///
/// `new`: an empty rule set whose cursor starts at order 0, with no floor
/// `starting_at`: an empty rule set whose cursor starts at the given order, which is also its floor
/// `insert`: insert a rule in a given order
/// `insert_at_current`: insert a rule in the order under the cursor
/// `advance_order`: move the cursor to the next order
/// `ordered_view`: iterate over the orders, in the order they are tried
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    orders: BTreeMap<OrderKey, Vec<Arc<Rule>>>,
    current: OrderKey,
    floor: Option<OrderKey>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty rule set that refuses rules below `start`, whose cursor starts at `start`.
    pub fn starting_at(start: OrderKey) -> Self {
        Self {
            orders: BTreeMap::new(),
            current: start,
            floor: Some(start),
        }
    }

    /// An empty rule set whose first order silently consumes whitespace.
    pub fn skipping_whitespace() -> Result<Self> {
        let mut set = Self::new();
        set.insert_at_current(Rule::full(r"\s+", Priority::Immediate, false)?);
        Ok(set)
    }

    /// Insert `rule` in the order `order`, creating it if needed.
    /// Fail if `order` is below the floor of the rule set.
    pub fn insert(&mut self, order: OrderKey, rule: impl Into<Arc<Rule>>) -> Result<&mut Self> {
        if let Some(floor) = self.floor {
            if order < floor {
                warn!(order, floor, "rule rejected below the order floor");
                return Error::InvalidOrder { order, floor }.err();
            }
        }
        self.insert_unchecked(order, rule.into());
        Ok(self)
    }

    /// Insert `rule` in the order under the cursor.
    pub fn insert_at_current(&mut self, rule: impl Into<Arc<Rule>>) -> &mut Self {
        self.insert_unchecked(self.current, rule.into());
        self
    }

    /// Insert every rule of `rules` in the order under the cursor, in sequence.
    pub fn extend_at_current<R>(&mut self, rules: impl IntoIterator<Item = R>) -> &mut Self
    where
        R: Into<Arc<Rule>>,
    {
        for rule in rules {
            self.insert_at_current(rule);
        }
        self
    }

    /// Move the cursor to the next order, creating it empty if needed.
    pub fn advance_order(&mut self) -> &mut Self {
        self.current = self.current.saturating_add(1);
        self.orders.entry(self.current).or_default();
        debug!(order = self.current, "advanced to next order");
        self
    }

    fn insert_unchecked(&mut self, order: OrderKey, rule: Arc<Rule>) {
        debug!(order, rule = %rule, "inserting rule");
        insert_by_priority(self.orders.entry(order).or_default(), rule);
    }

    /// Iterate over `(order, rules)` pairs, orders ascending, rules in the order they are tried.
    pub fn ordered_view(&self) -> impl Iterator<Item = (OrderKey, &[Arc<Rule>])> + '_ {
        self.orders
            .iter()
            .map(|(order, rules)| (*order, rules.as_slice()))
    }

    /// Iterate over every rule, in the order the scan engine tries them.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.orders.values().flatten().map(|rule| &**rule)
    }

    /// Return the rules of a given order, if it exists.
    pub fn order(&self, order: OrderKey) -> Option<&[Arc<Rule>]> {
        self.orders.get(&order).map(Vec::as_slice)
    }

    /// Return the order under the cursor.
    pub fn current_order(&self) -> OrderKey {
        self.current
    }

    /// Return the lowest order rules may be inserted in, if any.
    pub fn floor(&self) -> Option<OrderKey> {
        self.floor
    }

    /// Return the number of rules, across all orders.
    pub fn len(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tokenize `input`, see [`scan`].
    pub fn tokenize<'r, 't>(&'r self, input: &'t str) -> Result<Vec<Token<'r, 't>>> {
        scan(self, input)
    }

    /// Tokenize `input`, keeping only the text of the tokens.
    pub fn string_tokens<'t>(&self, input: &'t str) -> Result<Vec<&'t str>> {
        Ok(scan(self, input)?.into_iter().map(|token| token.text()).collect())
    }
}

/// Insert `rule` after every rule of priority greater or equal, and before
/// every rule of lower priority.
fn insert_by_priority(rules: &mut Vec<Arc<Rule>>, rule: Arc<Rule>) {
    match rules.last() {
        None => rules.push(rule),
        Some(last) if last.priority() >= rule.priority() => rules.push(rule),
        Some(_) => {
            let index = rules
                .iter()
                .position(|current| rule.priority() > current.priority())
                .unwrap_or(rules.len());
            rules.insert(index, rule);
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.orders
                .iter()
                .map(|(order, rules)| format!("{}=[{}]", order, rules.iter().join(", ")))
                .join(", ")
        )
    }
}
