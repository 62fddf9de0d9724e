//! Template argument sources and render policy

use serde::Deserialize;
use serde_json::{Map, Value};

use super::path::{canonical_index, parse_path, Segment};

/// Values a template is rendered against.
///
/// All shapes resolve through the same segment walk; the positional form
/// additionally short-circuits purely numeric tokens like `{0}`.
#[derive(Debug, Clone, Default)]
pub enum ArgumentSource {
    /// No arguments supplied; templates render unchanged
    #[default]
    Empty,
    /// Ordered scalar values addressed as `{0}`, `{1}`, ...
    Positional(Vec<Value>),
    /// Flat key/value mapping
    Flat(Map<String, Value>),
    /// Arbitrarily nested mappings and sequences
    Nested(Value),
}

impl ArgumentSource {
    /// Build a positional source from anything convertible into JSON values
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        ArgumentSource::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ArgumentSource::Empty)
    }

    /// Resolve a raw token body (the text between the braces).
    ///
    /// Returns `None` for anything unresolvable: malformed paths, missing
    /// keys, out-of-range indices, nulls, or descending into a scalar.
    pub fn resolve(&self, raw_path: &str) -> Option<&Value> {
        let path = raw_path.trim();

        if let ArgumentSource::Positional(values) = self {
            if !path.is_empty() && path.bytes().all(|b| b.is_ascii_digit()) {
                return canonical_index(path)
                    .and_then(|i| values.get(i))
                    .filter(|v| !v.is_null());
            }
        }

        let segments = parse_path(path).ok()?;
        let (first, rest) = segments.split_first()?;

        let mut current = self.root_step(first)?;
        for segment in rest {
            current = step(current, segment)?;
        }
        Some(current)
    }

    fn root_step(&self, segment: &Segment) -> Option<&Value> {
        let value = match self {
            ArgumentSource::Empty => None,
            ArgumentSource::Positional(values) => step_sequence(values, segment),
            ArgumentSource::Flat(map) => step_mapping(map, segment),
            ArgumentSource::Nested(value) => step(value, segment),
        };
        value.filter(|v| !v.is_null())
    }
}

impl From<Vec<Value>> for ArgumentSource {
    fn from(values: Vec<Value>) -> Self {
        ArgumentSource::Positional(values)
    }
}

impl From<Map<String, Value>> for ArgumentSource {
    fn from(map: Map<String, Value>) -> Self {
        ArgumentSource::Flat(map)
    }
}

impl From<Value> for ArgumentSource {
    fn from(value: Value) -> Self {
        ArgumentSource::Nested(value)
    }
}

fn step<'v>(value: &'v Value, segment: &Segment) -> Option<&'v Value> {
    let next = match value {
        Value::Object(map) => step_mapping(map, segment),
        Value::Array(items) => step_sequence(items, segment),
        _ => None,
    };
    next.filter(|v| !v.is_null())
}

fn step_mapping<'v>(map: &'v Map<String, Value>, segment: &Segment) -> Option<&'v Value> {
    match segment {
        Segment::Key(key) => map.get(key),
        Segment::Index(index) => map.get(&index.to_string()),
    }
}

fn step_sequence<'v>(items: &'v [Value], segment: &Segment) -> Option<&'v Value> {
    match segment {
        Segment::Index(index) => items.get(*index),
        Segment::Key(key) => canonical_index(key).and_then(|i| items.get(i)),
    }
}

/// Rendering behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RenderPolicy {
    /// Render resolved `0`, `false` and `""` as empty, like a missing value.
    /// Enabled by default for compatibility with existing chat templates.
    #[serde(default = "default_treat_falsy_as_missing")]
    pub treat_falsy_as_missing: bool,
}

fn default_treat_falsy_as_missing() -> bool {
    true
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self {
            treat_falsy_as_missing: default_treat_falsy_as_missing(),
        }
    }
}

impl RenderPolicy {
    /// Policy that renders falsy scalars as their literal text
    pub fn strict() -> Self {
        Self {
            treat_falsy_as_missing: false,
        }
    }

    pub(crate) fn hides(&self, value: &Value) -> bool {
        self.treat_falsy_as_missing && is_falsy(value)
    }
}

/// Falsy in the chat-bot sense: null, false, zero, or the empty string
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Text form of a resolved value.
///
/// Sequences join their elements with `,`; mappings use compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_nested() {
        let source = ArgumentSource::from(json!({
            "obj": { "list": [ { "name": "first" } ] }
        }));
        assert_eq!(source.resolve("obj.list[0].name"), Some(&json!("first")));
        assert_eq!(source.resolve("obj.list[1].name"), None);
        assert_eq!(source.resolve("obj.missing"), None);
    }

    #[test]
    fn test_resolve_index_on_mapping_and_key_on_sequence() {
        let source = ArgumentSource::from(json!({
            "byNumber": { "3": "three" },
            "seq": ["a", "b"]
        }));
        assert_eq!(source.resolve("byNumber.3"), Some(&json!("three")));
        assert_eq!(source.resolve(r#"seq["1"]"#), Some(&json!("b")));
    }

    #[test]
    fn test_leading_zero_digits_are_keys() {
        let source = ArgumentSource::from(json!({
            "a": { "01": "x", "1": "y" },
            "b": ["p", "q"]
        }));
        assert_eq!(source.resolve("a.01"), Some(&json!("x")));
        assert_eq!(source.resolve("a.1"), Some(&json!("y")));
        assert_eq!(source.resolve("b.01"), None);
        assert_eq!(source.resolve("b.0"), Some(&json!("p")));

        let positional = ArgumentSource::positional(["x", "y"]);
        assert_eq!(positional.resolve("01"), None);
    }

    #[test]
    fn test_resolve_positional() {
        let source = ArgumentSource::positional(["x", "y"]);
        assert_eq!(source.resolve("1"), Some(&json!("y")));
        assert_eq!(source.resolve("2"), None);
        assert_eq!(source.resolve(" 0 "), Some(&json!("x")));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let source = ArgumentSource::from(json!({ "a": null, "b": { "c": null } }));
        assert_eq!(source.resolve("a"), None);
        assert_eq!(source.resolve("b.c"), None);
    }

    #[test]
    fn test_descending_into_scalar_fails() {
        let source = ArgumentSource::from(json!({ "a": "text" }));
        assert_eq!(source.resolve("a.length"), None);
    }

    #[test]
    fn test_empty_source_resolves_nothing() {
        assert_eq!(ArgumentSource::Empty.resolve("a"), None);
    }

    #[test]
    fn test_falsy_policy() {
        let policy = RenderPolicy::default();
        assert!(policy.hides(&json!(0)));
        assert!(policy.hides(&json!(0.0)));
        assert!(policy.hides(&json!(false)));
        assert!(policy.hides(&json!("")));
        assert!(!policy.hides(&json!([])));
        assert!(!policy.hides(&json!("0")));
        assert!(!RenderPolicy::strict().hides(&json!(0)));
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!(42)), "42");
        assert_eq!(stringify(&json!(2.0)), "2");
        assert_eq!(stringify(&json!(2.5)), "2.5");
        assert_eq!(stringify(&json!(["a", 1, null])), "a,1,");
        assert_eq!(stringify(&json!({"k": "v"})), r#"{"k":"v"}"#);
    }
}
