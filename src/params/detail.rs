//! Validation error details.
//!
//! Every rejected input becomes one [`ErrorDetail`]; a request collects all of
//! them and answers with a single 422 report.

use serde::Serialize;
use serde_json::{json, Value};

/// Where an input came from. First segment of every error location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Path,
    Query,
    Body,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Path => "path",
            Source::Query => "query",
            Source::Body => "body",
        }
    }
}

/// One segment of an error location: a field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocPart {
    Key(String),
    Index(usize),
}

/// Error location, e.g. `["body", "item", "price"]` or `["query", "q", 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Loc(Vec<LocPart>);

impl Loc {
    pub fn new(source: Source) -> Self {
        Self(vec![LocPart::Key(source.as_str().to_string())])
    }

    pub fn of(source: Source, name: &str) -> Self {
        Self::new(source).key(name)
    }

    pub fn key(mut self, name: &str) -> Self {
        self.0.push(LocPart::Key(name.to_string()));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.0.push(LocPart::Index(index));
        self
    }

    pub fn parts(&self) -> &[LocPart] {
        &self.0
    }
}

/// The reason an input was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    Missing,
    IntParsing,
    IntType,
    IntFromFloat,
    FloatParsing,
    FloatType,
    BoolParsing,
    StringType,
    Enum { expected: String },
    Literal { expected: String },
    TooShort { min_length: usize },
    TooLong { max_length: usize },
    PatternMismatch { pattern: String },
    GreaterThan { gt: i64 },
    GreaterThanEqual { ge: i64 },
    LessThan { lt: i64 },
    LessThanEqual { le: i64 },
    ExtraForbidden,
    ValueError { message: String },
    JsonInvalid { error: String },
    ModelAttributesType,
}

impl Violation {
    /// Machine-readable error type, serialized as `type`.
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::Missing => "missing",
            Violation::IntParsing => "int_parsing",
            Violation::IntType => "int_type",
            Violation::IntFromFloat => "int_from_float",
            Violation::FloatParsing => "float_parsing",
            Violation::FloatType => "float_type",
            Violation::BoolParsing => "bool_parsing",
            Violation::StringType => "string_type",
            Violation::Enum { .. } => "enum",
            Violation::Literal { .. } => "literal_error",
            Violation::TooShort { .. } => "string_too_short",
            Violation::TooLong { .. } => "string_too_long",
            Violation::PatternMismatch { .. } => "string_pattern_mismatch",
            Violation::GreaterThan { .. } => "greater_than",
            Violation::GreaterThanEqual { .. } => "greater_than_equal",
            Violation::LessThan { .. } => "less_than",
            Violation::LessThanEqual { .. } => "less_than_equal",
            Violation::ExtraForbidden => "extra_forbidden",
            Violation::ValueError { .. } => "value_error",
            Violation::JsonInvalid { .. } => "json_invalid",
            Violation::ModelAttributesType => "model_attributes_type",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Violation::Missing => "Field required".to_string(),
            Violation::IntParsing => {
                "Input should be a valid integer, unable to parse string as an integer".to_string()
            }
            Violation::IntType => "Input should be a valid integer".to_string(),
            Violation::IntFromFloat => {
                "Input should be a valid integer, got a number with a fractional part".to_string()
            }
            Violation::FloatParsing => {
                "Input should be a valid number, unable to parse string as a number".to_string()
            }
            Violation::FloatType => "Input should be a valid number".to_string(),
            Violation::BoolParsing => {
                "Input should be a valid boolean, unable to interpret input".to_string()
            }
            Violation::StringType => "Input should be a valid string".to_string(),
            Violation::Enum { expected } | Violation::Literal { expected } => {
                format!("Input should be {}", expected)
            }
            Violation::TooShort { min_length } => format!(
                "String should have at least {} character{}",
                min_length,
                plural(*min_length)
            ),
            Violation::TooLong { max_length } => format!(
                "String should have at most {} character{}",
                max_length,
                plural(*max_length)
            ),
            Violation::PatternMismatch { pattern } => {
                format!("String should match pattern '{}'", pattern)
            }
            Violation::GreaterThan { gt } => format!("Input should be greater than {}", gt),
            Violation::GreaterThanEqual { ge } => {
                format!("Input should be greater than or equal to {}", ge)
            }
            Violation::LessThan { lt } => format!("Input should be less than {}", lt),
            Violation::LessThanEqual { le } => {
                format!("Input should be less than or equal to {}", le)
            }
            Violation::ExtraForbidden => "Extra inputs are not permitted".to_string(),
            Violation::ValueError { message } => format!("Value error, {}", message),
            Violation::JsonInvalid { .. } => "JSON decode error".to_string(),
            Violation::ModelAttributesType => {
                "Input should be a valid dictionary or object to extract fields from".to_string()
            }
        }
    }

    pub fn context(&self) -> Option<Value> {
        match self {
            Violation::Enum { expected } | Violation::Literal { expected } => {
                Some(json!({ "expected": expected }))
            }
            Violation::TooShort { min_length } => Some(json!({ "min_length": min_length })),
            Violation::TooLong { max_length } => Some(json!({ "max_length": max_length })),
            Violation::PatternMismatch { pattern } => Some(json!({ "pattern": pattern })),
            Violation::GreaterThan { gt } => Some(json!({ "gt": gt })),
            Violation::GreaterThanEqual { ge } => Some(json!({ "ge": ge })),
            Violation::LessThan { lt } => Some(json!({ "lt": lt })),
            Violation::LessThanEqual { le } => Some(json!({ "le": le })),
            Violation::ValueError { message } => Some(json!({ "error": message })),
            Violation::JsonInvalid { error } => Some(json!({ "error": error })),
            _ => None,
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Renders `['a', 'b', 'c']` as `'a', 'b' or 'c'`.
pub fn expected_list(options: &[&str]) -> String {
    let quoted: Vec<String> = options.iter().map(|o| format!("'{}'", o)).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// A single entry of the 422 report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: Loc,
    pub msg: String,
    pub input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl ErrorDetail {
    pub fn new(loc: Loc, violation: Violation, input: Value) -> Self {
        Self {
            kind: violation.kind(),
            msg: violation.message(),
            ctx: violation.context(),
            loc,
            input,
        }
    }
}
