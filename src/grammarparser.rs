//! # Plain rule files
//!
//! A plain rule file lists one rule per line:
//!
//! ```text
//! # comments take a whole line
//! @start 0
//! ignore immediate WS ::= \s+
//! KEYWORD ::= int|float
//! @next
//! INT ::= [0-9]+
//! @order 5
//! end ID ::= [a-z_]+
//! ```
//!
//! A rule is written `[ignore] [immediate|natural|end] NAME ::= pattern`, the
//! pattern running to the end of the line. `ignore` rules do not capture.
//! Rules go in the current order, which starts at the order given by `@start`
//! (0 if absent, in which case there is no floor), is set by `@order N`, and is
//! incremented by `@next`.

use crate::error::{Error, Result};
use crate::lexer::{OrderKey, RuleSet};
use crate::rule::{Priority, Rule};
use crate::stream::{Char, StringStream};
use tracing::debug;


/// Read a whole plain rule file into a [`RuleSet`].
pub fn read(stream: &mut StringStream) -> Result<RuleSet> {
    let mut set = RuleSet::new();
    let mut order: OrderKey = 0;
    let mut seen_rule = false;
    ignore_blank_lines(stream);
    while !stream.is_exhausted() {
        if read_keyword(stream, "@") {
            let start = stream.pos() - 1;
            let directive = read_id(stream)?;
            ignore_blank(stream);
            match directive.as_str() {
                "order" => order = read_integer(stream)?,
                "next" => order = order.saturating_add(1),
                "start" => {
                    if seen_rule {
                        return Err(generate_error_at(
                            stream,
                            start,
                            "`@start` must come before any rule",
                        ));
                    }
                    order = read_integer(stream)?;
                    set = RuleSet::starting_at(order);
                }
                other => {
                    return Err(generate_error_at(
                        stream,
                        start,
                        &format!("unknown directive `@{}`", other),
                    ))
                }
            }
            ignore_blank(stream);
            if !matches!(stream.get(), Char::Char('\n' | '\r') | Char::EOF) {
                return Err(generate_error(stream, "expected end of line"));
            }
        } else {
            let start = stream.pos();
            let rule = read_rule(stream)?;
            let location = stream.location_builder().from(start, stream.pos());
            set.insert(order, rule).map_err(|error| Error::RuleFileSyntax {
                message: error.to_string(),
                location,
            })?;
            seen_rule = true;
        }
        ignore_blank_lines(stream);
    }
    debug!(origin = %stream.origin().display(), rules = set.len(), "read plain rule file");
    Ok(set)
}

fn read_rule(stream: &mut StringStream) -> Result<Rule> {
    let mut words = Vec::new();
    loop {
        ignore_blank(stream);
        if read_keyword(stream, "::=") {
            break;
        }
        let start = stream.pos();
        match read_id(stream) {
            Ok(word) => words.push((start, word)),
            Err(_) if !words.is_empty() => return Err(generate_error(stream, "expected `::=`")),
            Err(error) => return Err(error),
        }
    }
    let Some((_, name)) = words.pop() else {
        return Err(generate_error(stream, "expected an identifier"));
    };
    let mut ignore = false;
    let mut priority = None;
    for (start, word) in words {
        if word == "ignore" {
            if ignore {
                return Err(generate_error_at(stream, start, "`ignore` given twice"));
            }
            ignore = true;
        } else {
            if priority.is_some() {
                return Err(generate_error_at(stream, start, "priority given twice"));
            }
            priority = Some(
                word.parse::<Priority>()
                    .map_err(|message| generate_error_at(stream, start, &message))?,
            );
        }
    }
    ignore_blank(stream);
    let start = stream.pos();
    let pattern = read_pattern(stream);
    if pattern.is_empty() {
        return Err(generate_error(stream, "expected a pattern"));
    }
    let rule = Rule::full(&pattern, priority.unwrap_or_default(), !ignore).map_err(|error| {
        Error::RuleFileSyntax {
            message: error.to_string(),
            location: stream.location_builder().from(start, stream.pos()),
        }
    })?;
    Ok(rule.named(name))
}

fn read_pattern(stream: &mut StringStream) -> String {
    let mut result = String::new();
    while let Char::Char(chr) = stream.get() {
        if chr == '\n' {
            break;
        }
        result.push(chr);
        stream.incr_pos();
    }
    if result.ends_with('\r') {
        result.pop();
    }
    result
}

/// Checks if there is the given keyword at the current position in the stream, and consumes it if there is.
fn read_keyword(stream: &mut StringStream, keyword: &str) -> bool {
    if stream.continues(keyword) {
        stream.shift(keyword.len());
        true
    } else {
        false
    }
}

fn ignore_blank(stream: &mut StringStream) {
    while let Char::Char(' ' | '\t') = stream.get() {
        stream.incr_pos();
    }
}

/// Skip whitespace, line breaks included, and comment lines.
fn ignore_blank_lines(stream: &mut StringStream) {
    loop {
        match stream.get() {
            Char::Char('#') => {
                while !matches!(stream.get(), Char::Char('\n') | Char::EOF) {
                    stream.incr_pos();
                }
            }
            Char::Char(chr) if chr.is_whitespace() => stream.incr_pos(),
            _ => break,
        }
    }
}

fn read_id(stream: &mut StringStream) -> Result<String> {
    let mut result = String::new();
    while let Char::Char(chr) = stream.get() {
        if !(chr.is_alphanumeric() || chr == '_') {
            break;
        }
        result.push(chr);
        stream.incr_pos();
    }
    if result.is_empty() {
        Err(generate_error(stream, "expected an identifier"))
    } else {
        Ok(result)
    }
}

fn read_integer(stream: &mut StringStream) -> Result<OrderKey> {
    let start = stream.pos();
    let mut result = String::new();
    if read_keyword(stream, "-") {
        result.push('-');
    }
    while let Char::Char(chr) = stream.get() {
        if !chr.is_ascii_digit() {
            break;
        }
        result.push(chr);
        stream.incr_pos();
    }
    result
        .parse()
        .map_err(|_| generate_error_at(stream, start, "expected an integer"))
}

fn generate_error(stream: &StringStream, message: &str) -> Error {
    generate_error_at(stream, stream.pos(), message)
}

fn generate_error_at(stream: &StringStream, start: usize, message: &str) -> Error {
    Error::RuleFileSyntax {
        message: message.to_string(),
        location: stream.location_builder().from(start, stream.pos().max(start)),
    }
}
