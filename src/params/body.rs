//! JSON request bodies.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use serde_json::error::Category;
use serde_json::{json, Map, Value};

use crate::error::ApiError;

use super::checker::Checker;
use super::coerce;
use super::detail::{ErrorDetail, Loc, Source, Violation};

/// A data model readable from a JSON object.
///
/// Implementations read every field first and combine afterwards, so all
/// field errors get recorded:
///
/// ```ignore
/// let name = fields.string("name");
/// let price = fields.float("price");
/// Some(Item { name: name?, price: price? })
/// ```
pub trait FromFields: Sized {
    fn from_fields(fields: &mut Fields<'_>) -> Option<Self>;
}

/// Field reader over one JSON object, rooted at `loc`.
pub struct Fields<'a> {
    checker: &'a mut Checker,
    loc: Loc,
    object: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(checker: &'a mut Checker, loc: Loc, object: &'a Map<String, Value>) -> Self {
        Self {
            checker,
            loc,
            object,
        }
    }

    fn required(&mut self, name: &str) -> Option<&'a Value> {
        let value = self.object.get(name);
        if value.is_none() {
            let input = Value::Object(self.object.clone());
            self.checker
                .report(self.loc.clone().key(name), Violation::Missing, input);
        }
        value
    }

    fn coerce<T>(
        &mut self,
        name: &str,
        value: &Value,
        f: fn(&Value) -> Result<T, Violation>,
    ) -> Option<T> {
        self.checker
            .record(self.loc.clone().key(name), || value.clone(), f(value))
    }

    fn optional<T>(
        &mut self,
        name: &str,
        f: fn(&Value) -> Result<T, Violation>,
    ) -> Option<Option<T>> {
        match self.object.get(name) {
            None | Some(Value::Null) => Some(None),
            Some(value) => self.coerce(name, value, f).map(Some),
        }
    }

    pub fn string(&mut self, name: &str) -> Option<String> {
        let value = self.required(name)?;
        self.coerce(name, value, coerce::json_string)
    }

    pub fn optional_string(&mut self, name: &str) -> Option<Option<String>> {
        self.optional(name, coerce::json_string)
    }

    pub fn float(&mut self, name: &str) -> Option<f64> {
        let value = self.required(name)?;
        self.coerce(name, value, coerce::json_float)
    }

    pub fn optional_float(&mut self, name: &str) -> Option<Option<f64>> {
        self.optional(name, coerce::json_float)
    }

    pub fn int(&mut self, name: &str) -> Option<i64> {
        let value = self.required(name)?;
        self.coerce(name, value, coerce::json_int)
    }

    /// Nested model; errors are located under `name`.
    pub fn model<T: FromFields>(&mut self, name: &str) -> Option<T> {
        let value = self.required(name)?;
        let loc = self.loc.clone().key(name);
        self.checker.model(loc, value)
    }
}

/// Raw JSON body. An empty body reads as `None`; malformed JSON is rejected
/// with a single `json_invalid` report before any handler runs.
///
/// Bodies sent with a non-JSON content type are not parsed. Their text is
/// handed on as a JSON string, which no model accepts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonBody(pub Option<Value>);

impl JsonBody {
    pub fn value(&self) -> Option<&Value> {
        self.0.as_ref()
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        if !json {
            let text = (!bytes.is_empty())
                .then(|| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
            return Ok(JsonBody(text));
        }
        parse_body(&bytes)
            .map(JsonBody)
            .map_err(|detail| ApiError::Validation(vec![detail]).into_response())
    }
}

/// A missing content type, `application/json`, or any `application/*+json`.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim();
    match essence.split_once('/') {
        Some((kind, subtype)) if kind.eq_ignore_ascii_case("application") => {
            let subtype = subtype.to_ascii_lowercase();
            subtype == "json" || subtype.ends_with("+json")
        }
        _ => false,
    }
}

/// Only a zero-length body is absent; whitespace alone is malformed JSON.
pub fn parse_body(bytes: &[u8]) -> Result<Option<Value>, ErrorDetail> {
    if bytes.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(bytes).map(Some).map_err(|err| {
        let offset = match err.classify() {
            Category::Eof => bytes.len(),
            _ => byte_offset(bytes, err.line(), err.column()),
        };
        ErrorDetail::new(
            Loc::new(Source::Body).index(offset),
            Violation::JsonInvalid {
                error: err.to_string(),
            },
            json!({}),
        )
    })
}

/// Converts serde_json's 1-based line/column into a byte offset.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = bytes
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (line_start + column.saturating_sub(1)).min(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[derive(Debug, PartialEq)]
    struct Pet {
        name: String,
        age: Option<i64>,
    }

    impl FromFields for Pet {
        fn from_fields(fields: &mut Fields<'_>) -> Option<Self> {
            let name = fields.string("name");
            let age = fields.int("age").map(Some);
            Some(Pet {
                name: name?,
                age: age?,
            })
        }
    }

    #[derive(Debug, PartialEq)]
    struct Owner {
        pet: Pet,
    }

    impl FromFields for Owner {
        fn from_fields(fields: &mut Fields<'_>) -> Option<Self> {
            Some(Owner {
                pet: fields.model("pet")?,
            })
        }
    }

    #[test]
    fn test_empty_body_is_absent() {
        assert_eq!(parse_body(b""), Ok(None));
    }

    #[test]
    fn test_whitespace_body_is_malformed() {
        let detail = parse_body(b"  \n").unwrap_err();
        assert_eq!(detail.kind, "json_invalid");
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["loc"], json!(["body", 3]));
    }

    #[test]
    fn test_malformed_json_location() {
        let detail = parse_body(b"{\n  \"name\": }").unwrap_err();
        assert_eq!(detail.kind, "json_invalid");
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["loc"], json!(["body", 12]));
    }

    #[test]
    fn test_truncated_json_location_is_body_length() {
        let raw = br#"{"name": "Foo""#;
        let detail = parse_body(raw).unwrap_err();
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["loc"], json!(["body", raw.len()]));
        assert_eq!(value["loc"][1], 14);
    }

    fn content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type(&HeaderMap::new()));
        assert!(is_json_content_type(&content_type("application/json")));
        assert!(is_json_content_type(&content_type(
            "application/json; charset=utf-8"
        )));
        assert!(is_json_content_type(&content_type(
            "application/merge-patch+json"
        )));
        assert!(is_json_content_type(&content_type("Application/JSON")));
        assert!(!is_json_content_type(&content_type("text/plain")));
        assert!(!is_json_content_type(&content_type("application/xml")));
        assert!(!is_json_content_type(&content_type("json")));
    }

    #[test]
    fn test_text_body_is_not_a_model() {
        let body = Value::String("name=Foo".to_string());
        let mut check = Checker::new();
        let pet: Option<Pet> = check.body(Some(&body));
        assert!(pet.is_none());
        assert_eq!(check.errors()[0].kind, "model_attributes_type");
    }

    #[test]
    fn test_all_field_errors_collected() {
        let body = json!({"age": "old"});
        let mut check = Checker::new();
        let pet: Option<Pet> = check.body(Some(&body));
        assert!(pet.is_none());

        let errors: Vec<Value> = check
            .errors()
            .iter()
            .map(|e| serde_json::to_value(e).unwrap())
            .collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["type"], "missing");
        assert_eq!(errors[0]["loc"], json!(["body", "name"]));
        assert_eq!(errors[0]["input"], body);
        assert_eq!(errors[1]["type"], "int_parsing");
        assert_eq!(errors[1]["loc"], json!(["body", "age"]));
    }

    #[test]
    fn test_nested_location() {
        let body = json!({"pet": {"name": 5, "age": 2}});
        let mut check = Checker::new();
        let owner: Option<Owner> = check.body(Some(&body));
        assert!(owner.is_none());
        let value = serde_json::to_value(&check.errors()[0]).unwrap();
        assert_eq!(value["type"], "string_type");
        assert_eq!(value["loc"], json!(["body", "pet", "name"]));
    }

    #[test]
    fn test_model_requires_object() {
        let body = json!([1, 2]);
        let mut check = Checker::new();
        let pet: Option<Pet> = check.body(Some(&body));
        assert!(pet.is_none());
        assert_eq!(check.errors()[0].kind, "model_attributes_type");
    }

    #[test]
    fn test_missing_required_body() {
        let mut check = Checker::new();
        let pet: Option<Pet> = check.body(None);
        assert!(pet.is_none());
        assert_eq!(check.errors()[0].kind, "missing");

        let mut check = Checker::new();
        let pet: Option<Option<Pet>> = check.optional_body(None);
        assert_eq!(pet, Some(None));
    }

    #[test]
    fn test_valid_nested_model() {
        let body = json!({"pet": {"name": "Rex", "age": 4.0}, "ignored": true});
        let mut check = Checker::new();
        let owner: Option<Owner> = check.body(Some(&body));
        assert_eq!(
            owner,
            Some(Owner {
                pet: Pet {
                    name: "Rex".to_string(),
                    age: Some(4)
                }
            })
        );
    }
}
