//! Declarative frontmatter schemas.
//!
//! A [`Schema`] is a static list of [`Field`]s. Validation walks the raw
//! frontmatter object once, collects every violation with its dotted path,
//! and on success yields a [`Record`] of typed values that a collection turns
//! into its frontmatter struct.
//!
//! Keys not declared by the schema are stripped.
//!
//! | Type                 | Accepts                                          |
//! |----------------------|--------------------------------------------------|
//! | `FieldType::String`  | strings                                          |
//! | `FieldType::Date`    | ISO dates/datetimes, epoch milliseconds (coerced)|
//! | `FieldType::List(s)` | arrays of objects matching the nested schema `s` |

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use super::error::SchemaIssues;
use super::frontmatter::type_name;
use crate::utils::date::DateTimeUtc;

/// Expected type of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    String,
    /// Coerced to a UTC datetime.
    Date,
    /// Ordered list of objects, each validated against the nested schema.
    List(&'static Schema),
}

/// One declared field.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub key: &'static str,
    pub ty: FieldType,
    pub optional: bool,
}

impl Field {
    pub const fn required(key: &'static str, ty: FieldType) -> Self {
        Self {
            key,
            ty,
            optional: false,
        }
    }

    pub const fn optional(key: &'static str, ty: FieldType) -> Self {
        Self {
            key,
            ty,
            optional: true,
        }
    }
}

/// Object schema: an ordered set of fields.
#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [Field],
}

/// A validated, typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Typed {
    String(String),
    Date(DateTimeUtc),
    List(Vec<Record>),
}

/// Validated object: declared keys that were present, with typed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: FxHashMap<&'static str, Typed>,
}

impl Record {
    pub fn take_string(&mut self, key: &str) -> Option<String> {
        match self.values.remove(key)? {
            Typed::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn take_date(&mut self, key: &str) -> Option<DateTimeUtc> {
        match self.values.remove(key)? {
            Typed::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn take_list(&mut self, key: &str) -> Option<Vec<Record>> {
        match self.values.remove(key)? {
            Typed::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Schema {
    /// Validate `object`, reporting every violation.
    pub fn validate(&self, object: &Map<String, Value>) -> Result<Record, SchemaIssues> {
        let mut issues = SchemaIssues::default();
        let record = self.validate_at(object, "", &mut issues);
        if issues.is_empty() {
            Ok(record)
        } else {
            Err(issues)
        }
    }

    /// Keys present in `object` but not declared here.
    pub fn unknown_keys<'a>(&self, object: &'a Map<String, Value>) -> Vec<&'a str> {
        object
            .keys()
            .map(String::as_str)
            .filter(|key| !self.fields.iter().any(|f| f.key == *key))
            .collect()
    }

    fn validate_at(&self, object: &Map<String, Value>, prefix: &str, issues: &mut SchemaIssues) -> Record {
        let mut record = Record::default();

        for field in self.fields {
            let path = join_path(prefix, field.key);
            match object.get(field.key) {
                None if field.optional => {}
                None => issues.push(path, "Required"),
                Some(value) => {
                    if let Some(typed) = field.ty.check(value, &path, issues) {
                        record.values.insert(field.key, typed);
                    }
                }
            }
        }

        record
    }
}

impl FieldType {
    fn check(self, value: &Value, path: &str, issues: &mut SchemaIssues) -> Option<Typed> {
        match self {
            Self::String => match value {
                Value::String(s) => Some(Typed::String(s.clone())),
                other => {
                    issues.push(path, expected("string", other));
                    None
                }
            },
            Self::Date => match coerce_date(value) {
                Some(date) => Some(Typed::Date(date)),
                None => {
                    issues.push(path, "Invalid date");
                    None
                }
            },
            Self::List(schema) => {
                let Value::Array(items) = value else {
                    issues.push(path, expected("array", value));
                    return None;
                };
                let before = issues.len();
                let mut records = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let item_path = join_path(path, &i.to_string());
                    match item {
                        Value::Object(object) => {
                            records.push(schema.validate_at(object, &item_path, issues));
                        }
                        other => issues.push(item_path, expected("object", other)),
                    }
                }
                (issues.len() == before).then_some(Typed::List(records))
            }
        }
    }
}

/// Coerce a frontmatter value into a date.
///
/// Strings are parsed as ISO 8601 / RFC 3339, or written out as `Jul 08 2022`
/// / `July 8, 2022`; integers (and floats, truncated)
/// are milliseconds since the Unix epoch. Everything else is rejected.
pub fn coerce_date(value: &Value) -> Option<DateTimeUtc> {
    match value {
        Value::String(s) => DateTimeUtc::parse(s).or_else(|| DateTimeUtc::parse_month_name(s)),
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(i) => i,
                #[allow(clippy::cast_possible_truncation)]
                None => n.as_f64().filter(|f| f.is_finite())?.trunc() as i64,
            };
            DateTimeUtc::from_unix_millis(millis)
        }
        _ => None,
    }
}

fn expected(ty: &str, found: &Value) -> String {
    format!("Expected {ty}, received {}", type_name(found))
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static ITEM: Schema = Schema {
        fields: &[
            Field::required("name", FieldType::String),
            Field::optional("at", FieldType::Date),
        ],
    };

    static SAMPLE: Schema = Schema {
        fields: &[
            Field::required("title", FieldType::String),
            Field::optional("when", FieldType::Date),
            Field::optional("items", FieldType::List(&ITEM)),
        ],
    };

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_valid_record() {
        let mut record = SAMPLE
            .validate(&object(json!({
                "title": "Hi",
                "when": "2024-01-01",
                "items": [{"name": "a"}, {"name": "b", "at": 0}],
                "ignored": true
            })))
            .unwrap();

        assert_eq!(record.take_string("title").as_deref(), Some("Hi"));
        assert_eq!(record.take_date("when"), Some(DateTimeUtc::from_ymd(2024, 1, 1)));
        let mut items = record.take_list("items").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].take_date("at"), Some(DateTimeUtc::from_ymd(1970, 1, 1)));
        assert_eq!(record, Record::default());
    }

    #[test]
    fn test_collects_all_issues() {
        let issues = SAMPLE
            .validate(&object(json!({
                "title": 42,
                "when": "yesterday",
                "items": [{"name": "ok"}, {"at": "2024-01-01"}, "loose"]
            })))
            .unwrap_err();

        let found: Vec<_> = issues
            .iter()
            .map(|i| (i.path.as_str(), i.message.as_str()))
            .collect();
        assert_eq!(
            found,
            [
                ("title", "Expected string, received number"),
                ("when", "Invalid date"),
                ("items.1.name", "Required"),
                ("items.2", "Expected object, received string"),
            ]
        );
    }

    #[test]
    fn test_optional_null_is_rejected() {
        let issues = SAMPLE
            .validate(&object(json!({"title": "x", "items": null})))
            .unwrap_err();
        assert!(issues.has("items"));
    }

    #[test]
    fn test_unknown_keys() {
        let raw = object(json!({"title": "x", "tags": [], "draft": true}));
        assert_eq!(SAMPLE.unknown_keys(&raw), ["tags", "draft"]);
    }

    #[test]
    fn test_coerce_date() {
        assert_eq!(
            coerce_date(&json!("2024-03-04T05:06:07Z")),
            Some(DateTimeUtc::new(2024, 3, 4, 5, 6, 7))
        );
        assert_eq!(
            coerce_date(&json!(1_704_067_200_000_i64)),
            Some(DateTimeUtc::from_ymd(2024, 1, 1))
        );
        assert_eq!(
            coerce_date(&json!(1_704_067_200_999.9)),
            Some(DateTimeUtc::from_ymd(2024, 1, 1))
        );
        assert_eq!(coerce_date(&json!(true)), None);
        assert_eq!(coerce_date(&json!(null)), None);
        assert_eq!(coerce_date(&json!(["2024-01-01"])), None);
    }
}
