//! Placeholder substitution engine for chat templates

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::types::{stringify, ArgumentSource, RenderPolicy};

lazy_static! {
    /// `{path}` with a non-empty body that contains no closing brace
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\{([^}]+)\}").unwrap();
}

/// Render `template` against `source` using the default policy.
///
/// Never fails: unresolvable tokens become the empty string.
pub fn render_template(template: &str, source: &ArgumentSource) -> String {
    render_with_policy(template, source, RenderPolicy::default())
}

/// Render `template` against `source` with an explicit policy.
pub fn render_with_policy(template: &str, source: &ArgumentSource, policy: RenderPolicy) -> String {
    if source.is_empty() {
        return template.to_string();
    }

    TOKEN_PATTERN
        .replace_all(template, |caps: &Captures| {
            source
                .resolve(&caps[1])
                .filter(|value| !policy.hides(value))
                .map(stringify)
                .unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested(value: serde_json::Value) -> ArgumentSource {
        ArgumentSource::from(value)
    }

    #[test]
    fn test_template_without_tokens_is_unchanged() {
        let template = "no placeholders here";
        assert_eq!(render_template(template, &nested(json!({"a": 1}))), template);
        assert_eq!(
            render_template(template, &ArgumentSource::positional(["x"])),
            template
        );
        assert_eq!(render_template(template, &ArgumentSource::Empty), template);
    }

    #[test]
    fn test_empty_source_skips_substitution() {
        assert_eq!(
            render_template("hello {0} {name}", &ArgumentSource::Empty),
            "hello {0} {name}"
        );
    }

    #[test]
    fn test_positional() {
        let source = ArgumentSource::positional(["x", "y"]);
        assert_eq!(render_template("{0}-{1}", &source), "x-y");
        assert_eq!(render_template("hello {0} world {0}!", &source), "hello x world x!");
    }

    #[test]
    fn test_positional_and_nested_agree() {
        let positional = ArgumentSource::positional(["x", "y"]);
        let sequence = nested(json!(["x", "y"]));
        assert_eq!(
            render_template("{0}-{1}", &positional),
            render_template("{0}-{1}", &sequence)
        );
    }

    #[test]
    fn test_flat_mapping() {
        let mut map = serde_json::Map::new();
        map.insert("name".into(), json!("foo"));
        map.insert("test".into(), json!("bar"));
        let source = ArgumentSource::from(map);
        assert_eq!(
            render_template("hello {name} world {test}!", &source),
            "hello foo world bar!"
        );
    }

    #[test]
    fn test_nested_paths() {
        let source = nested(json!({"obj": {"name": "foo", "test": ["bar"]}}));
        assert_eq!(
            render_template("hello {obj.name} world {obj.test[0]}!", &source),
            "hello foo world bar!"
        );
    }

    #[test]
    fn test_unresolved_paths_render_empty() {
        assert_eq!(render_template("{a.b}", &nested(json!({"a": {}}))), "");
        assert_eq!(
            render_template("[{missing}] [{a[9]}]", &nested(json!({"a": [1]}))),
            "[] []"
        );
        assert_eq!(render_template("{a..}", &nested(json!({"a": 1}))), "");
    }

    #[test]
    fn test_whitespace_inside_braces() {
        let source = nested(json!({"match": ["1234-5678", "1234", "5678"]}));
        assert_eq!(render_template("FC: { match.1 } - {match.2}", &source), "FC: 1234 - 5678");
    }

    #[test]
    fn test_container_values() {
        let source = nested(json!({"list": ["a", "b"], "map": {"k": 1}}));
        assert_eq!(render_template("{list}", &source), "a,b");
        assert_eq!(render_template("{map}", &source), r#"{"k":1}"#);
    }

    #[test]
    fn test_falsy_values_render_empty_by_default() {
        let source = nested(json!({"zero": 0, "no": false, "blank": "", "yes": true, "n": 7}));
        assert_eq!(
            render_template("[{zero}][{no}][{blank}][{yes}][{n}]", &source),
            "[][][][true][7]"
        );
    }

    #[test]
    fn test_strict_policy_keeps_falsy_values() {
        let source = nested(json!({"zero": 0, "no": false}));
        assert_eq!(
            render_with_policy("{zero}/{no}", &source, RenderPolicy::strict()),
            "0/false"
        );
    }

    #[test]
    fn test_unbalanced_braces_are_left_alone() {
        let source = nested(json!({"a": "x"}));
        assert_eq!(render_template("{a} {b", &source), "x {b");
        assert_eq!(render_template("{}", &source), "{}");
    }
}
