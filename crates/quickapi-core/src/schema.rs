//! Declarative value schemas with structured validation issues.
//!
//! A [`Schema`] describes the expected shape of a JSON value. Parsing either
//! returns the parsed value or the complete list of [`SchemaIssue`]s found.
//! Issues use the same wire shape as zod, so a client written against a
//! zod-backed service can read them unchanged:
//!
//! ```json
//! [{"code": "invalid_type", "expected": "string", "received": "undefined", "path": ["id"], "message": "Required"}]
//! ```
//!
//! # Semantics
//!
//! - Values are required unless marked [`Schema::optional`]
//! - `null` is rejected unless marked [`Schema::nullable`]
//! - Objects drop keys not declared in the schema unless marked [`Schema::passthrough`]
//! - All issues are collected; parsing does not stop at the first one
//!
//! # Example
//!
//! ```
//! use quickapi_core::schema::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::object([
//!     ("id", Schema::string().min_length(1)),
//!     ("tags", Schema::array(Schema::string()).optional()),
//! ]);
//!
//! let parsed = schema.safe_parse(&json!({"id": "a1", "extra": true})).unwrap();
//! assert_eq!(parsed, json!({"id": "a1"}));
//!
//! let issues = schema.safe_parse(&json!({})).unwrap_err();
//! assert_eq!(issues[0].message, "Required");
//! ```

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Kind of a JSON value as reported in schema issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// A string.
    String,
    /// Any number.
    Number,
    /// A whole number.
    Integer,
    /// A number with a fractional part.
    Float,
    /// `true` or `false`.
    Boolean,
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
    /// `null`.
    Null,
    /// A value that is absent altogether.
    Undefined,
    /// Anything at all.
    Any,
}

impl ValueKind {
    /// Returns the kind of an optional value; `None` is [`ValueKind::Undefined`].
    #[must_use]
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => Self::Undefined,
            Some(Value::Null) => Self::Null,
            Some(Value::Bool(_)) => Self::Boolean,
            Some(Value::Number(_)) => Self::Number,
            Some(Value::String(_)) => Self::String,
            Some(Value::Array(_)) => Self::Array,
            Some(Value::Object(_)) => Self::Object,
        }
    }

    /// Returns the lowercase name used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable issue code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// The value is missing or has the wrong type.
    InvalidType,
    /// The value is below a length, size, or numeric minimum.
    TooSmall,
    /// The value is above a length, size, or numeric maximum.
    TooBig,
    /// A string did not match its pattern.
    InvalidString,
}

/// One step of the path to an offending value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(idx) => write!(f, "{idx}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        Self::Index(idx)
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaIssue {
    /// Issue code.
    pub code: IssueCode,
    /// Expected kind, for type issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<ValueKind>,
    /// Received kind, for type issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<ValueKind>,
    /// Violated lower bound, for `too_small`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    /// Violated upper bound, for `too_big`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    /// Location of the offending value; empty for the root.
    pub path: Vec<PathSegment>,
    /// Human-readable description.
    pub message: String,
}

impl SchemaIssue {
    fn invalid_type(expected: ValueKind, received: ValueKind, path: &[PathSegment]) -> Self {
        let message = if received == ValueKind::Undefined {
            "Required".to_string()
        } else {
            format!("Expected {expected}, received {received}")
        };

        Self {
            code: IssueCode::InvalidType,
            expected: Some(expected),
            received: Some(received),
            minimum: None,
            maximum: None,
            path: path.to_vec(),
            message,
        }
    }

    fn too_small(minimum: Option<Number>, path: &[PathSegment], message: String) -> Self {
        Self {
            code: IssueCode::TooSmall,
            expected: None,
            received: None,
            minimum,
            maximum: None,
            path: path.to_vec(),
            message,
        }
    }

    fn too_big(maximum: Option<Number>, path: &[PathSegment], message: String) -> Self {
        Self {
            code: IssueCode::TooBig,
            expected: None,
            received: None,
            minimum: None,
            maximum,
            path: path.to_vec(),
            message,
        }
    }

    fn invalid_string(path: &[PathSegment]) -> Self {
        Self {
            code: IssueCode::InvalidString,
            expected: None,
            received: None,
            minimum: None,
            maximum: None,
            path: path.to_vec(),
            message: "Invalid".to_string(),
        }
    }

    /// Returns the path joined with dots, e.g. `body.items.0.id`.
    #[must_use]
    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.dotted_path(), self.message)
        }
    }
}

/// Validates an optional value against an optional schema.
///
/// Without a schema the value passes through untouched. With one, a missing
/// value is validated as absent, so a required schema reports `Required`.
pub fn validate(
    value: Option<Value>,
    schema: Option<&Schema>,
) -> Result<Option<Value>, Vec<SchemaIssue>> {
    match schema {
        None => Ok(value),
        Some(schema) => schema.parse_optional(value.as_ref()),
    }
}

#[derive(Debug, Clone)]
enum Kind {
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
        pattern: Option<Regex>,
    },
    Integer {
        minimum: Option<i64>,
        maximum: Option<i64>,
    },
    Number {
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    Boolean,
    Array {
        items: Box<Schema>,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
    Object {
        properties: IndexMap<String, Schema>,
        passthrough: bool,
    },
    Any,
    Null,
}

/// A value schema.
///
/// Constraint builders that do not apply to the schema's type are ignored,
/// e.g. `Schema::boolean().min_length(3)` is just a boolean schema.
#[derive(Debug, Clone)]
pub struct Schema {
    kind: Kind,
    optional: bool,
    nullable: bool,
}

impl Schema {
    const fn with_kind(kind: Kind) -> Self {
        Self {
            kind,
            optional: false,
            nullable: false,
        }
    }

    /// Creates a string schema.
    #[must_use]
    pub const fn string() -> Self {
        Self::with_kind(Kind::String {
            min_length: None,
            max_length: None,
            pattern: None,
        })
    }

    /// Creates an integer schema.
    #[must_use]
    pub const fn integer() -> Self {
        Self::with_kind(Kind::Integer {
            minimum: None,
            maximum: None,
        })
    }

    /// Creates a number schema accepting integers and floats.
    #[must_use]
    pub const fn number() -> Self {
        Self::with_kind(Kind::Number {
            minimum: None,
            maximum: None,
        })
    }

    /// Creates a boolean schema.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::with_kind(Kind::Boolean)
    }

    /// Creates an array schema whose items all match `items`.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self::with_kind(Kind::Array {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        })
    }

    /// Creates an object schema from `(name, schema)` pairs.
    ///
    /// Declaration order is preserved and determines issue order.
    #[must_use]
    pub fn object<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Self::with_kind(Kind::Object {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
            passthrough: false,
        })
    }

    /// Creates a schema that accepts any value, including an absent one.
    #[must_use]
    pub const fn any() -> Self {
        Self::with_kind(Kind::Any)
    }

    /// Creates a schema that accepts only `null`.
    #[must_use]
    pub const fn null() -> Self {
        Self::with_kind(Kind::Null)
    }

    /// Allows the value to be absent.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Allows the value to be `null`.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Keeps object keys that are not declared in the schema.
    #[must_use]
    pub fn passthrough(mut self) -> Self {
        if let Kind::Object { passthrough, .. } = &mut self.kind {
            *passthrough = true;
        }
        self
    }

    /// Sets the minimum length, in characters, of a string.
    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        if let Kind::String { min_length, .. } = &mut self.kind {
            *min_length = Some(len);
        }
        self
    }

    /// Sets the maximum length, in characters, of a string.
    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        if let Kind::String { max_length, .. } = &mut self.kind {
            *max_length = Some(len);
        }
        self
    }

    /// Requires a string to match a regular expression.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let compiled = Regex::new(pattern)?;
        if let Kind::String { pattern, .. } = &mut self.kind {
            *pattern = Some(compiled);
        }
        Ok(self)
    }

    /// Sets the inclusive minimum of an integer.
    #[must_use]
    pub fn minimum_int(mut self, min: i64) -> Self {
        if let Kind::Integer { minimum, .. } = &mut self.kind {
            *minimum = Some(min);
        }
        self
    }

    /// Sets the inclusive maximum of an integer.
    #[must_use]
    pub fn maximum_int(mut self, max: i64) -> Self {
        if let Kind::Integer { maximum, .. } = &mut self.kind {
            *maximum = Some(max);
        }
        self
    }

    /// Sets the inclusive minimum of a number.
    #[must_use]
    pub fn minimum(mut self, min: f64) -> Self {
        if let Kind::Number { minimum, .. } = &mut self.kind {
            *minimum = Some(min);
        }
        self
    }

    /// Sets the inclusive maximum of a number.
    #[must_use]
    pub fn maximum(mut self, max: f64) -> Self {
        if let Kind::Number { maximum, .. } = &mut self.kind {
            *maximum = Some(max);
        }
        self
    }

    /// Sets the minimum number of array items.
    #[must_use]
    pub fn min_items(mut self, min: usize) -> Self {
        if let Kind::Array { min_items, .. } = &mut self.kind {
            *min_items = Some(min);
        }
        self
    }

    /// Sets the maximum number of array items.
    #[must_use]
    pub fn max_items(mut self, max: usize) -> Self {
        if let Kind::Array { max_items, .. } = &mut self.kind {
            *max_items = Some(max);
        }
        self
    }

    /// Returns whether an absent value is accepted.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional || matches!(self.kind, Kind::Any)
    }

    /// Returns the kind this schema expects.
    #[must_use]
    pub const fn expected_kind(&self) -> ValueKind {
        match self.kind {
            Kind::String { .. } => ValueKind::String,
            Kind::Integer { .. } => ValueKind::Integer,
            Kind::Number { .. } => ValueKind::Number,
            Kind::Boolean => ValueKind::Boolean,
            Kind::Array { .. } => ValueKind::Array,
            Kind::Object { .. } => ValueKind::Object,
            Kind::Any => ValueKind::Any,
            Kind::Null => ValueKind::Null,
        }
    }

    /// Parses a present value.
    ///
    /// # Errors
    ///
    /// Returns every issue found.
    pub fn safe_parse(&self, value: &Value) -> Result<Value, Vec<SchemaIssue>> {
        self.parse_optional(Some(value))
            .map(|parsed| parsed.unwrap_or(Value::Null))
    }

    /// Parses a value that may be absent.
    ///
    /// `Ok(None)` means the value was absent and the schema allowed it.
    ///
    /// # Errors
    ///
    /// Returns every issue found.
    pub fn parse_optional(&self, value: Option<&Value>) -> Result<Option<Value>, Vec<SchemaIssue>> {
        let mut path = Vec::new();
        let mut issues = Vec::new();
        let parsed = self.parse_at(value, &mut path, &mut issues);

        if issues.is_empty() {
            Ok(parsed)
        } else {
            Err(issues)
        }
    }

    fn parse_at(
        &self,
        value: Option<&Value>,
        path: &mut Vec<PathSegment>,
        issues: &mut Vec<SchemaIssue>,
    ) -> Option<Value> {
        let value = match value {
            None => {
                if !self.is_optional() {
                    issues.push(SchemaIssue::invalid_type(
                        self.expected_kind(),
                        ValueKind::Undefined,
                        path,
                    ));
                }
                return None;
            }
            Some(Value::Null) if self.nullable || matches!(self.kind, Kind::Null | Kind::Any) => {
                return Some(Value::Null);
            }
            Some(value) => value,
        };

        match &self.kind {
            Kind::String {
                min_length,
                max_length,
                pattern,
            } => {
                let Some(s) = value.as_str() else {
                    issues.push(self.type_mismatch(value, path));
                    return None;
                };

                let len = s.chars().count();
                if let Some(min) = *min_length {
                    if len < min {
                        issues.push(SchemaIssue::too_small(
                            Some(Number::from(min)),
                            path,
                            format!("String must contain at least {min} character(s)"),
                        ));
                    }
                }
                if let Some(max) = *max_length {
                    if len > max {
                        issues.push(SchemaIssue::too_big(
                            Some(Number::from(max)),
                            path,
                            format!("String must contain at most {max} character(s)"),
                        ));
                    }
                }
                if let Some(re) = pattern {
                    if !re.is_match(s) {
                        issues.push(SchemaIssue::invalid_string(path));
                    }
                }

                Some(value.clone())
            }

            Kind::Integer { minimum, maximum } => {
                // Widened so u64 values above i64::MAX compare exactly.
                let n = match (value.as_i64(), value.as_u64()) {
                    (Some(n), _) => i128::from(n),
                    (None, Some(n)) => i128::from(n),
                    (None, None) if value.is_number() => {
                        issues.push(SchemaIssue::invalid_type(
                            ValueKind::Integer,
                            ValueKind::Float,
                            path,
                        ));
                        return None;
                    }
                    (None, None) => {
                        issues.push(self.type_mismatch(value, path));
                        return None;
                    }
                };

                if let Some(min) = *minimum {
                    if n < i128::from(min) {
                        issues.push(SchemaIssue::too_small(
                            Some(Number::from(min)),
                            path,
                            format!("Number must be greater than or equal to {min}"),
                        ));
                    }
                }
                if let Some(max) = *maximum {
                    if n > i128::from(max) {
                        issues.push(SchemaIssue::too_big(
                            Some(Number::from(max)),
                            path,
                            format!("Number must be less than or equal to {max}"),
                        ));
                    }
                }

                Some(value.clone())
            }

            Kind::Number { minimum, maximum } => {
                let Some(n) = value.as_f64() else {
                    issues.push(self.type_mismatch(value, path));
                    return None;
                };

                if let Some(min) = *minimum {
                    if n < min {
                        issues.push(SchemaIssue::too_small(
                            Number::from_f64(min),
                            path,
                            format!("Number must be greater than or equal to {min}"),
                        ));
                    }
                }
                if let Some(max) = *maximum {
                    if n > max {
                        issues.push(SchemaIssue::too_big(
                            Number::from_f64(max),
                            path,
                            format!("Number must be less than or equal to {max}"),
                        ));
                    }
                }

                Some(value.clone())
            }

            Kind::Boolean => {
                if value.is_boolean() {
                    Some(value.clone())
                } else {
                    issues.push(self.type_mismatch(value, path));
                    None
                }
            }

            Kind::Array {
                items,
                min_items,
                max_items,
            } => {
                let Some(arr) = value.as_array() else {
                    issues.push(self.type_mismatch(value, path));
                    return None;
                };

                if let Some(min) = *min_items {
                    if arr.len() < min {
                        issues.push(SchemaIssue::too_small(
                            Some(Number::from(min)),
                            path,
                            format!("Array must contain at least {min} element(s)"),
                        ));
                    }
                }
                if let Some(max) = *max_items {
                    if arr.len() > max {
                        issues.push(SchemaIssue::too_big(
                            Some(Number::from(max)),
                            path,
                            format!("Array must contain at most {max} element(s)"),
                        ));
                    }
                }

                let mut parsed = Vec::with_capacity(arr.len());
                for (idx, item) in arr.iter().enumerate() {
                    path.push(PathSegment::Index(idx));
                    parsed.push(
                        items
                            .parse_at(Some(item), path, issues)
                            .unwrap_or(Value::Null),
                    );
                    path.pop();
                }

                Some(Value::Array(parsed))
            }

            Kind::Object {
                properties,
                passthrough,
            } => {
                let Some(obj) = value.as_object() else {
                    issues.push(self.type_mismatch(value, path));
                    return None;
                };

                let mut parsed = Map::new();
                for (key, schema) in properties {
                    path.push(PathSegment::Key(key.clone()));
                    if let Some(v) = schema.parse_at(obj.get(key), path, issues) {
                        parsed.insert(key.clone(), v);
                    }
                    path.pop();
                }

                if *passthrough {
                    for (key, v) in obj {
                        if !properties.contains_key(key) {
                            parsed.insert(key.clone(), v.clone());
                        }
                    }
                }

                Some(Value::Object(parsed))
            }

            Kind::Any => Some(value.clone()),

            // null was accepted above
            Kind::Null => {
                issues.push(self.type_mismatch(value, path));
                None
            }
        }
    }

    fn type_mismatch(&self, value: &Value, path: &[PathSegment]) -> SchemaIssue {
        SchemaIssue::invalid_type(self.expected_kind(), ValueKind::of(Some(value)), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn id_schema() -> Schema {
        Schema::object([("id", Schema::string())])
    }

    #[test]
    fn test_missing_required_field_matches_wire_shape() {
        let issues = id_schema().safe_parse(&json!({})).unwrap_err();

        assert_eq!(
            serde_json::to_value(&issues).unwrap(),
            json!([{
                "code": "invalid_type",
                "expected": "string",
                "received": "undefined",
                "path": ["id"],
                "message": "Required"
            }])
        );
    }

    #[test]
    fn test_wrong_type_message() {
        let issues = id_schema().safe_parse(&json!({"id": 5})).unwrap_err();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].received, Some(ValueKind::Number));
        assert_eq!(issues[0].message, "Expected string, received number");
    }

    #[test]
    fn test_null_rejected_unless_nullable() {
        let strict = id_schema().safe_parse(&json!({"id": null})).unwrap_err();
        assert_eq!(strict[0].message, "Expected string, received null");

        let lenient = Schema::object([("id", Schema::string().nullable())]);
        assert_eq!(
            lenient.safe_parse(&json!({"id": null})).unwrap(),
            json!({"id": null})
        );
    }

    #[test]
    fn test_optional_field_omitted() {
        let schema = Schema::object([
            ("id", Schema::string()),
            ("note", Schema::string().optional()),
        ]);

        assert_eq!(
            schema.safe_parse(&json!({"id": "x"})).unwrap(),
            json!({"id": "x"})
        );
    }

    #[test]
    fn test_unknown_keys_stripped() {
        let parsed = id_schema()
            .safe_parse(&json!({"id": "x", "admin": true}))
            .unwrap();
        assert_eq!(parsed, json!({"id": "x"}));
    }

    #[test]
    fn test_passthrough_keeps_unknown_keys() {
        let parsed = id_schema()
            .passthrough()
            .safe_parse(&json!({"id": "x", "admin": true}))
            .unwrap();
        assert_eq!(parsed, json!({"id": "x", "admin": true}));
    }

    #[test]
    fn test_collects_all_issues_in_declaration_order() {
        let schema = Schema::object([
            ("b", Schema::string()),
            ("a", Schema::integer()),
            ("c", Schema::boolean()),
        ]);

        let issues = schema.safe_parse(&json!({"c": "yes"})).unwrap_err();
        let paths: Vec<_> = issues.iter().map(SchemaIssue::dotted_path).collect();

        assert_eq!(paths, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_nested_array_paths() {
        let schema = Schema::object([(
            "body",
            Schema::object([("items", Schema::array(Schema::object([("id", Schema::string())])))]),
        )]);

        let issues = schema
            .safe_parse(&json!({"body": {"items": [{"id": "ok"}, {}]}}))
            .unwrap_err();

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].path,
            vec![
                PathSegment::from("body"),
                PathSegment::from("items"),
                PathSegment::from(1),
                PathSegment::from("id"),
            ]
        );
        assert_eq!(issues[0].to_string(), "body.items.1.id: Required");
    }

    #[test]
    fn test_string_length_bounds() {
        let schema = Schema::string().min_length(2).max_length(3);

        assert!(schema.safe_parse(&json!("ab")).is_ok());

        let short = schema.safe_parse(&json!("a")).unwrap_err();
        assert_eq!(short[0].code, IssueCode::TooSmall);
        assert_eq!(short[0].minimum, Some(Number::from(2)));

        let long = schema.safe_parse(&json!("abcd")).unwrap_err();
        assert_eq!(long[0].code, IssueCode::TooBig);
        assert_eq!(long[0].message, "String must contain at most 3 character(s)");
    }

    #[test]
    fn test_string_pattern() {
        let schema = Schema::string().pattern("^[a-z]+$").unwrap();

        assert!(schema.safe_parse(&json!("abc")).is_ok());
        let issues = schema.safe_parse(&json!("ABC")).unwrap_err();
        assert_eq!(issues[0].code, IssueCode::InvalidString);
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(Schema::string().pattern("(").is_err());
    }

    #[test]
    fn test_integer_rejects_float() {
        let issues = Schema::integer().safe_parse(&json!(1.5)).unwrap_err();

        assert_eq!(issues[0].expected, Some(ValueKind::Integer));
        assert_eq!(issues[0].received, Some(ValueKind::Float));
    }

    #[test]
    fn test_integer_bounds() {
        let schema = Schema::integer().minimum_int(1).maximum_int(10);

        assert!(schema.safe_parse(&json!(5)).is_ok());
        assert_eq!(
            schema.safe_parse(&json!(0)).unwrap_err()[0].message,
            "Number must be greater than or equal to 1"
        );
        assert_eq!(
            schema.safe_parse(&json!(11)).unwrap_err()[0].code,
            IssueCode::TooBig
        );
    }

    #[test]
    fn test_integer_bounds_exact_above_f64_precision() {
        let max = 9_007_199_254_740_992_i64;
        let schema = Schema::integer().maximum_int(max);

        assert!(schema.safe_parse(&json!(max)).is_ok());
        let issues = schema.safe_parse(&json!(9_007_199_254_740_993_u64)).unwrap_err();
        assert_eq!(issues[0].code, IssueCode::TooBig);

        let schema = Schema::integer().minimum_int(-max);
        assert!(schema.safe_parse(&json!(-max)).is_ok());
        assert!(schema.safe_parse(&json!(-9_007_199_254_740_993_i64)).is_err());

        let schema = Schema::integer().maximum_int(i64::MAX);
        assert!(schema.safe_parse(&json!(u64::MAX)).is_err());
    }

    #[test]
    fn test_number_bounds() {
        let schema = Schema::number().minimum(0.5).maximum(1.5);

        assert!(schema.safe_parse(&json!(1)).is_ok());
        assert!(schema.safe_parse(&json!(0.25)).is_err());
    }

    #[test]
    fn test_array_item_bounds() {
        let schema = Schema::array(Schema::integer()).min_items(1).max_items(2);

        assert!(schema.safe_parse(&json!([1])).is_ok());
        assert!(schema.safe_parse(&json!([])).is_err());
        assert!(schema.safe_parse(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_null_schema() {
        assert!(Schema::null().safe_parse(&json!(null)).is_ok());
        assert!(Schema::null().safe_parse(&json!(0)).is_err());
    }

    #[test]
    fn test_any_accepts_absent() {
        assert_eq!(Schema::any().parse_optional(None), Ok(None));
        assert_eq!(
            Schema::any().safe_parse(&json!({"x": 1})).unwrap(),
            json!({"x": 1})
        );
    }

    #[test]
    fn test_validate_without_schema_passes_through() {
        assert_eq!(validate(None, None), Ok(None));
        assert_eq!(
            validate(Some(json!({"raw": true})), None),
            Ok(Some(json!({"raw": true})))
        );
    }

    #[test]
    fn test_validate_absent_against_required_schema() {
        let issues = validate(None, Some(&Schema::string())).unwrap_err();

        assert_eq!(issues[0].message, "Required");
        assert!(issues[0].path.is_empty());
    }

    #[test]
    fn test_constraint_on_wrong_kind_is_ignored() {
        let schema = Schema::boolean().min_length(3).min_items(1);
        assert!(schema.safe_parse(&json!(true)).is_ok());
    }

    proptest! {
        #[test]
        fn prop_string_schema_accepts_any_string(s in ".*") {
            let value = Value::String(s);
            prop_assert_eq!(Schema::string().safe_parse(&value), Ok(value.clone()));
        }

        #[test]
        fn prop_integer_schema_rejects_strings(s in "[a-z]{1,8}") {
            let issues = Schema::integer().safe_parse(&Value::String(s)).unwrap_err();
            prop_assert_eq!(issues[0].code, IssueCode::InvalidType);
        }
    }
}
