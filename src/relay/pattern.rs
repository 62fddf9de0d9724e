//! Bounded compilation of user-supplied message patterns
//!
//! The `regex` engine matches in linear time, so only the pattern length and
//! the compiled program size need bounding.
//!
//! Chat bot configs are written against browser-style regexes, where `\d`,
//! `\w` and `\b` only cover ASCII. Those escapes are rewritten to their ASCII
//! forms before compiling; `\s` and `\p{..}` keep their Unicode meaning.

use regex::{Regex, RegexBuilder};
use serde_json::Value;
use thiserror::Error;

use crate::config::RelayConfig;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern is {len} characters long, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("invalid pattern: {0}")]
    Invalid(#[from] regex::Error),
}

/// Compilation bounds for `msg_pattern`
#[derive(Debug, Clone, Copy)]
pub struct PatternLimits {
    pub max_length: usize,
    pub size_limit: usize,
}

impl From<&RelayConfig> for PatternLimits {
    fn from(config: &RelayConfig) -> Self {
        Self {
            max_length: config.max_pattern_length,
            size_limit: config.regex_size_limit,
        }
    }
}

pub fn compile_pattern(pattern: &str, limits: PatternLimits) -> Result<Regex, PatternError> {
    let len = pattern.chars().count();
    if len > limits.max_length {
        return Err(PatternError::TooLong {
            len,
            max: limits.max_length,
        });
    }

    Ok(RegexBuilder::new(&ascii_perl_classes(pattern))
        .size_limit(limits.size_limit)
        .dfa_size_limit(limits.size_limit)
        .build()?)
}

const DIGIT: &str = "0-9";
const WORD: &str = "0-9A-Za-z_";

/// Rewrite `\d \D \w \W` to ASCII sets, inside and outside bracket classes,
/// and `\b` to an ASCII word boundary. `\B` stays Unicode because the ASCII
/// form can split a UTF-8 sequence. Every other escape is copied through.
fn ascii_perl_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;
    // a `]` right after `[` or `[^` is a literal member
    let mut class_start = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push(c);
                    break;
                };
                match (next, in_class) {
                    ('d', true) => out.push_str(DIGIT),
                    ('w', true) => out.push_str(WORD),
                    ('D', true) => out.push_str(&format!("[^{}]", DIGIT)),
                    ('W', true) => out.push_str(&format!("[^{}]", WORD)),
                    ('d', false) => out.push_str(&format!("[{}]", DIGIT)),
                    ('w', false) => out.push_str(&format!("[{}]", WORD)),
                    ('D', false) => out.push_str(&format!("[^{}]", DIGIT)),
                    ('W', false) => out.push_str(&format!("[^{}]", WORD)),
                    ('b', false) => out.push_str(r"(?-u:\b)"),
                    _ => {
                        out.push(c);
                        out.push(next);
                    }
                }
                class_start = false;
            }
            '[' if !in_class => {
                out.push(c);
                in_class = true;
                class_start = true;
                if chars.peek() == Some(&'^') {
                    out.push('^');
                    chars.next();
                }
            }
            ']' if in_class && !class_start => {
                out.push(c);
                in_class = false;
            }
            _ => {
                out.push(c);
                class_start = false;
            }
        }
    }
    out
}

/// Capture groups of the first match as a sequence: group 0 is the whole
/// match, groups that did not participate are null. `None` when no match.
pub fn capture_groups(pattern: &Regex, message: &str) -> Option<Value> {
    let caps = pattern.captures(message)?;
    Some(Value::Array(
        caps.iter()
            .map(|group| match group {
                Some(m) => Value::String(m.as_str().to_string()),
                None => Value::Null,
            })
            .collect(),
    ))
}
