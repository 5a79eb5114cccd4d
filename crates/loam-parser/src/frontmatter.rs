//! Front-matter and inline property extraction
//!
//! Two property sources are merged into one [`Properties`] mapping:
//! - a leading YAML block delimited by `---` lines
//! - `key:: value` lines anywhere in the body (outliner page properties)
//!
//! Inline values override front-matter values for the same key. Both kinds
//! of lines are removed from the returned body.

use crate::error::ParserError;
use crate::types::{Properties, PropertyValue};
use regex::Regex;
use serde_yaml::Value;
use std::sync::LazyLock;

static FRONTMATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)\z").expect("frontmatter regex"));

static INLINE_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\w+)::[ \t]*(.+)$").expect("inline property regex"));

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").expect("blank run regex"));

/// Result of splitting properties off a document body
#[derive(Debug, Default)]
pub struct PropertyExtraction {
    pub properties: Properties,
    pub body: String,
    /// Recoverable problems; the body is still usable when these are present
    pub warnings: Vec<ParserError>,
}

/// Split front-matter and inline properties off `content`.
///
/// Unparseable YAML is reported as a warning and the front-matter block is
/// left in the body untouched. CRLF line endings are read as LF.
pub fn extract_properties(content: &str) -> PropertyExtraction {
    let content = content.replace("\r\n", "\n");
    let mut extraction = PropertyExtraction::default();
    let mut body = content.as_str();

    if let Some(caps) = FRONTMATTER.captures(&content) {
        let yaml = caps.get(1).map_or("", |m| m.as_str());
        let rest = caps.get(2).map_or("", |m| m.as_str());

        match serde_yaml::from_str::<Value>(yaml) {
            Ok(Value::Mapping(mapping)) => {
                for (key, value) in mapping {
                    extraction
                        .properties
                        .insert(scalar_text(&key), property_value(&value));
                }
                body = rest;
            }
            Ok(other) => {
                if !other.is_null() {
                    extraction
                        .warnings
                        .push(ParserError::FrontmatterShape(value_kind(&other)));
                }
                body = rest;
            }
            Err(e) => {
                extraction.warnings.push(ParserError::frontmatter(e.to_string()));
            }
        }
    }

    for caps in INLINE_PROPERTY.captures_iter(body) {
        let key = &caps[1];
        let value = caps[2].trim();
        extraction.properties.insert(key, PropertyValue::from(value));
    }

    let stripped = INLINE_PROPERTY.replace_all(body, "");
    extraction.body = BLANK_RUN.replace_all(&stripped, "\n\n").into_owned();
    extraction
}

fn property_value(value: &Value) -> PropertyValue {
    match value {
        Value::Sequence(items) => PropertyValue::List(items.iter().map(scalar_text).collect()),
        Value::Tagged(tagged) => property_value(&tagged.value),
        other => PropertyValue::Text(scalar_text(other)),
    }
}

/// Render a YAML value as flat text; nested structures become compact JSON
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string(value)
            .unwrap_or_else(|_| serde_yaml::to_string(value).unwrap_or_default().trim().to_string()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter_is_parsed_and_stripped() {
        let content = "---\ntitle: My Page\ntags: [rust, notes]\ncount: 3\n---\n- first bullet\n";
        let extraction = extract_properties(content);

        assert!(extraction.warnings.is_empty());
        assert_eq!(extraction.body, "- first bullet\n");
        assert_eq!(extraction.properties.title().as_deref(), Some("My Page"));
        assert_eq!(
            extraction.properties.get("tags"),
            Some(&PropertyValue::List(vec!["rust".into(), "notes".into()]))
        );
        assert_eq!(extraction.properties.get("count"), Some(&PropertyValue::from("3")));
    }

    #[test]
    fn test_inline_properties_override_frontmatter() {
        let content = "---\ntitle: From YAML\nauthor: me\n---\ntitle:: From Inline\n- body\n";
        let extraction = extract_properties(content);

        assert_eq!(extraction.properties.title().as_deref(), Some("From Inline"));
        let keys: Vec<_> = extraction.properties.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["title", "author"]);
        assert!(!extraction.body.contains("title::"));
    }

    #[test]
    fn test_inline_properties_without_frontmatter() {
        let content = "alias:: Other Name\ntype:: book\n\n- content\n";
        let extraction = extract_properties(content);

        assert_eq!(extraction.properties.len(), 2);
        assert_eq!(
            extraction.properties.get("type"),
            Some(&PropertyValue::from("book"))
        );
        assert_eq!(extraction.body.trim(), "- content");
    }

    #[test]
    fn test_indented_block_properties_stay_in_body() {
        let content = "- block\n  id:: 64f1c2d3-0000\n";
        let extraction = extract_properties(content);

        assert!(extraction.properties.is_empty());
        assert!(extraction.body.contains("id:: 64f1c2d3-0000"));
    }

    #[test]
    fn test_crlf_frontmatter() {
        let content = "---\r\ntitle: Real Title\r\ntags: [a]\r\n---\r\n- body\r\n";
        let extraction = extract_properties(content);

        assert!(extraction.warnings.is_empty());
        assert_eq!(extraction.properties.title().as_deref(), Some("Real Title"));
        assert!(extraction.properties.get("tags").is_some());
        assert_eq!(extraction.body, "- body\n");
    }

    #[test]
    fn test_invalid_yaml_keeps_raw_content() {
        let content = "---\ntitle: [unclosed\n---\n- body\n";
        let extraction = extract_properties(content);

        assert!(matches!(
            extraction.warnings.as_slice(),
            [ParserError::FrontmatterError(_)]
        ));
        assert!(extraction.body.starts_with("---\ntitle: [unclosed"));
    }

    #[test]
    fn test_non_mapping_frontmatter_is_stripped_with_warning() {
        let content = "---\n- just\n- a list\n---\nbody\n";
        let extraction = extract_properties(content);

        assert_eq!(extraction.body, "body\n");
        assert!(extraction.properties.is_empty());
        assert!(matches!(
            extraction.warnings.as_slice(),
            [ParserError::FrontmatterShape("sequence")]
        ));
    }

    #[test]
    fn test_blank_runs_collapse() {
        let content = "a:: 1\n\n\nb:: 2\n\n\nbody\n";
        let extraction = extract_properties(content);
        assert!(!extraction.body.contains("\n\n\n"));
        assert!(extraction.body.ends_with("body\n"));
    }

    #[test]
    fn test_nested_mapping_renders_as_json() {
        let content = "---\nauthor:\n  name: Ada\n---\nbody\n";
        let extraction = extract_properties(content);
        assert_eq!(
            extraction.properties.get("author"),
            Some(&PropertyValue::from(r#"{"name":"Ada"}"#))
        );
    }
}
