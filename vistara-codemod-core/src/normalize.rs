// style normalization - swaps raw literals in style objects for design tokens

use crate::catalog::{is_token_reference, token_for_literal};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

/// normalize a style object, returning a new one with literals replaced by tokens.
///
/// nested objects (pseudo-selectors, at-rules) are normalized recursively and
/// arrays element-wise. keys, key order and non-string values are preserved,
/// and token references are left as they are, so the function is idempotent.
pub fn normalize_style(style: &Value) -> Value {
    match style {
        Value::String(value) => Value::String(normalize_value(value)),
        Value::Object(entries) => {
            let normalized: Map<String, Value> = entries
                .iter()
                .map(|(property, value)| (property.clone(), normalize_style(value)))
                .collect();
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize_style).collect()),
        other => other.clone(),
    }
}

/// normalize a single style value
pub fn normalize_value(value: &str) -> String {
    if is_token_reference(value) {
        return value.to_string();
    }
    token_for_literal(value)
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

/// a literal that should have been a token, found in a props/style tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HardcodedValue {
    pub key: String,
    pub value: String,
}

impl HardcodedValue {
    pub fn describe(&self) -> String {
        format!("{}: {} (use CSS variable instead)", self.key, self.value)
    }
}

lazy_static! {
    static ref FULL_HEX: Regex = Regex::new(r"(?i)^#[0-9a-f]{6}$").unwrap();
    static ref BARE_PIXELS: Regex = Regex::new(r"^\d+px$").unwrap();
}

/// walk a props tree and report every 6-digit hex color or bare pixel value.
///
/// keys are reported as dotted paths (`hover.color`, `shadows.0`).
pub fn find_hardcoded(props: &Value) -> Vec<HardcodedValue> {
    let mut found = Vec::new();
    collect_hardcoded(props, "", &mut found);
    found
}

fn collect_hardcoded(value: &Value, key: &str, found: &mut Vec<HardcodedValue>) {
    match value {
        Value::String(text) => {
            if FULL_HEX.is_match(text) || BARE_PIXELS.is_match(text) {
                found.push(HardcodedValue {
                    key: key.to_string(),
                    value: text.clone(),
                });
            }
        }
        Value::Object(entries) => {
            for (child, nested) in entries {
                collect_hardcoded(nested, &join_key(key, child), found);
            }
        }
        Value::Array(items) => {
            for (index, nested) in items.iter().enumerate() {
                collect_hardcoded(nested, &join_key(key, &index.to_string()), found);
            }
        }
        _ => {}
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_replaces_known_literals() {
        let style = json!({
            "color": "#6c5ce7",
            "padding": "16px",
            "borderRadius": "0.5rem",
            "display": "flex"
        });

        assert_eq!(
            normalize_style(&style),
            json!({
                "color": "var(--color-primary)",
                "padding": "var(--space-4)",
                "borderRadius": "var(--border-radius-md)",
                "display": "flex"
            })
        );
    }

    #[test]
    fn test_preserves_key_order() {
        let style = json!({ "z": "8px", "a": "4px", "m": 1 });
        let normalized = normalize_style(&style);
        let keys: Vec<&String> = normalized.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_recurses_into_nested_objects_and_arrays() {
        let style = json!({
            "&:hover": { "backgroundColor": "#ffffff" },
            "margins": ["4px", "var(--space-2)", 0]
        });

        assert_eq!(
            normalize_style(&style),
            json!({
                "&:hover": { "backgroundColor": "var(--color-white)" },
                "margins": ["var(--space-1)", "var(--space-2)", 0]
            })
        );
    }

    #[test]
    fn test_is_idempotent() {
        let style = json!({
            "color": "#E17055",
            "gap": "12px",
            "lineHeight": 1.5,
            "border": "1px solid #000",
            "nested": { "top": "64px", "list": ["36px", null] }
        });
        let once = normalize_style(&style);
        assert_eq!(normalize_style(&once), once);
    }

    #[test]
    fn test_every_token_literal_maps_to_its_table_entry() {
        for pattern in catalog().iter().filter(|p| p.is_token_table()) {
            for (literal, token) in pattern.entries() {
                let style = json!({ "prop": literal });
                let once = normalize_style(&style);
                assert_eq!(once["prop"], *token, "{} literal {literal}", pattern.kind);
                assert_eq!(pattern.lookup(literal), Some(*token));
                assert_eq!(normalize_style(&once), once, "{} literal {literal}", pattern.kind);
            }
        }
    }

    #[test]
    fn test_unknown_values_pass_through() {
        assert_eq!(normalize_value("17px"), "17px");
        assert_eq!(normalize_value("var(--space-4)"), "var(--space-4)");
        assert_eq!(normalize_style(&json!(42)), json!(42));
    }

    #[test]
    fn test_find_hardcoded_reports_dotted_keys() {
        let props = json!({
            "color": "#A29BFE",
            "style": { "padding": "10px", "margin": "var(--space-2)" },
            "shadows": ["2px"],
            "label": "hello"
        });

        let found: Vec<String> = find_hardcoded(&props).iter().map(|h| h.describe()).collect();
        assert_eq!(
            found,
            vec![
                "color: #A29BFE (use CSS variable instead)",
                "style.padding: 10px (use CSS variable instead)",
                "shadows.0: 2px (use CSS variable instead)",
            ]
        );
    }
}
