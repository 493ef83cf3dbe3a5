//! Frontmatter detection and parsing.
//!
//! Two delimiters are recognised at the very start of a file:
//!
//! ```text
//! ---            +++
//! title: Hi      title = "Hi"
//! ---            +++
//! body...        body...
//! ```
//!
//! Both are parsed into a JSON object so the schema validator sees one value
//! model regardless of syntax.

use serde_json::{Map, Value};

use super::error::FrontmatterError;

/// Raw frontmatter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontmatter<'a> {
    Yaml(&'a str),
    Toml(&'a str),
}

/// Split `source` into its frontmatter block and the remaining body.
///
/// Returns `None` when the file does not open with a complete `---` or
/// `+++` block.
pub fn split_frontmatter(source: &str) -> Option<(Frontmatter<'_>, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        let Some(rest) = source.strip_prefix(fence) else {
            continue;
        };
        // Opening fence must be alone on its line
        let Some(rest) = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
        else {
            continue;
        };

        let (block, body) = find_closing(rest, fence)?;
        let frontmatter = if is_toml {
            Frontmatter::Toml(block)
        } else {
            Frontmatter::Yaml(block)
        };
        return Some((frontmatter, body));
    }

    None
}

/// Find the line holding only `fence`; return (block, body after it).
fn find_closing<'a>(rest: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == fence {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((block, body.trim_start_matches(['\r', '\n'])));
        }
        offset += line.len();
    }
    None
}

/// Parse a frontmatter block into a JSON object.
///
/// An empty block yields an empty object; any other non-mapping value is an
/// error.
pub fn parse_frontmatter(frontmatter: Frontmatter<'_>) -> Result<Map<String, Value>, FrontmatterError> {
    let value = match frontmatter {
        Frontmatter::Yaml(text) => {
            if text.trim().is_empty() {
                return Ok(Map::new());
            }
            serde_yaml::from_str::<Value>(text).map_err(FrontmatterError::Yaml)?
        }
        Frontmatter::Toml(text) => {
            let table: toml::Table = toml::from_str(text).map_err(FrontmatterError::Toml)?;
            toml_to_json(toml::Value::Table(table))
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(FrontmatterError::NotAMapping(type_name(&other))),
    }
}

/// Convert a TOML value to JSON. Datetimes become their RFC 3339 string.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Type name used in validation messages (`string`, `number`, ...).
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_yaml() {
        let source = "---\ntitle: Hello\n---\n\n# Body\n";
        let (fm, body) = split_frontmatter(source).unwrap();
        assert_eq!(fm, Frontmatter::Yaml("title: Hello\n"));
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_toml_crlf() {
        let source = "+++\r\ntitle = \"Hello\"\r\n+++\r\nBody";
        let (fm, body) = split_frontmatter(source).unwrap();
        assert_eq!(fm, Frontmatter::Toml("title = \"Hello\"\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_none() {
        assert!(split_frontmatter("# Just content").is_none());
        // Unterminated block
        assert!(split_frontmatter("---\ntitle: x\n").is_none());
        // Thematic break later in the file is not frontmatter
        assert!(split_frontmatter("text\n---\nmore").is_none());
        // Fence must be alone on its line
        assert!(split_frontmatter("--- title\n---\n").is_none());
    }

    #[test]
    fn test_split_ignores_inner_dashes() {
        let source = "---\ntitle: a---b\n---\nbody";
        let (fm, body) = split_frontmatter(source).unwrap();
        assert_eq!(fm, Frontmatter::Yaml("title: a---b\n"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_parse_yaml_nested() {
        let text = "title: Hi\npubDate: 2024-01-01\nfaq:\n  - question: Q?\n    answer: A.\n";
        let map = parse_frontmatter(Frontmatter::Yaml(text)).unwrap();
        assert_eq!(map["title"], json!("Hi"));
        assert_eq!(map["pubDate"], json!("2024-01-01"));
        assert_eq!(map["faq"], json!([{"question": "Q?", "answer": "A."}]));
    }

    #[test]
    fn test_parse_toml_datetime() {
        let text = "title = \"Hi\"\npubDate = 2024-01-01\nupdatedDate = 2024-02-03T04:05:06Z\n";
        let map = parse_frontmatter(Frontmatter::Toml(text)).unwrap();
        assert_eq!(map["pubDate"], json!("2024-01-01"));
        assert_eq!(map["updatedDate"], json!("2024-02-03T04:05:06Z"));
    }

    #[test]
    fn test_parse_empty_and_invalid() {
        assert!(parse_frontmatter(Frontmatter::Yaml("")).unwrap().is_empty());
        assert!(matches!(
            parse_frontmatter(Frontmatter::Yaml("- a\n- b\n")),
            Err(FrontmatterError::NotAMapping("array"))
        ));
        assert!(matches!(
            parse_frontmatter(Frontmatter::Yaml("title: [unclosed")),
            Err(FrontmatterError::Yaml(_))
        ));
        assert!(matches!(
            parse_frontmatter(Frontmatter::Toml("title = ")),
            Err(FrontmatterError::Toml(_))
        ));
    }
}
