//! Request input checking.
//!
//! A [`Checker`] reads path, query and body inputs one by one, coercing and
//! constraining each. Failures are recorded instead of returned early so a
//! client sees every problem with its request in one 422 report.
//!
//! Readers return `Option<T>`: for required inputs `None` always means an
//! error was recorded; for optional inputs it means absent or rejected.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::ApiError;

use super::body::{Fields, FromFields};
use super::coerce::{self, Choice};
use super::detail::{ErrorDetail, Loc, Source, Violation};
use super::query::QueryMap;
use super::rules::{IntRules, StrRules};

#[derive(Debug, Default)]
pub struct Checker {
    errors: Vec<ErrorDetail>,
    consumed: HashSet<String>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, loc: Loc, violation: Violation, input: Value) {
        self.errors.push(ErrorDetail::new(loc, violation, input));
    }

    pub fn errors(&self) -> &[ErrorDetail] {
        &self.errors
    }

    pub(crate) fn record<T>(
        &mut self,
        loc: Loc,
        input: impl FnOnce() -> Value,
        result: Result<T, Violation>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                self.report(loc, violation, input());
                None
            }
        }
    }

    fn text<T>(&mut self, loc: Loc, raw: &str, result: Result<T, Violation>) -> Option<T> {
        self.record(loc, || Value::String(raw.to_string()), result)
    }

    pub fn path_str(&mut self, name: &str, raw: &str, rules: &StrRules) -> Option<String> {
        let result = rules.check(raw).map(|()| raw.to_string());
        self.text(Loc::of(Source::Path, name), raw, result)
    }

    pub fn path_int(&mut self, name: &str, raw: &str, rules: &IntRules) -> Option<i64> {
        let result = coerce::int(raw).and_then(|v| rules.check(v).map(|()| v));
        self.text(Loc::of(Source::Path, name), raw, result)
    }

    pub fn path_choice<T: Choice>(&mut self, name: &str, raw: &str) -> Option<T> {
        self.text(Loc::of(Source::Path, name), raw, coerce::choice(raw))
    }

    fn take<'q>(&mut self, query: &'q QueryMap, key: &str) -> Option<&'q str> {
        self.consumed.insert(key.to_string());
        query.last(key)
    }

    pub fn query_str(&mut self, query: &QueryMap, name: &str, rules: &StrRules) -> Option<String> {
        let raw = self.take(query, name)?;
        let result = rules.check(raw).map(|()| raw.to_string());
        self.text(Loc::of(Source::Query, name), raw, result)
    }

    pub fn query_required_str(
        &mut self,
        query: &QueryMap,
        name: &str,
        rules: &StrRules,
    ) -> Option<String> {
        if !query.contains(name) {
            self.consumed.insert(name.to_string());
            self.report(Loc::of(Source::Query, name), Violation::Missing, Value::Null);
            return None;
        }
        self.query_str(query, name, rules)
    }

    pub fn query_int(&mut self, query: &QueryMap, name: &str, rules: &IntRules) -> Option<i64> {
        let raw = self.take(query, name)?;
        let result = coerce::int(raw).and_then(|v| rules.check(v).map(|()| v));
        self.text(Loc::of(Source::Query, name), raw, result)
    }

    pub fn query_bool(&mut self, query: &QueryMap, name: &str) -> Option<bool> {
        let raw = self.take(query, name)?;
        self.text(Loc::of(Source::Query, name), raw, coerce::boolean(raw))
    }

    pub fn query_choice<T: Choice>(&mut self, query: &QueryMap, name: &str) -> Option<T> {
        let raw = self.take(query, name)?;
        self.text(Loc::of(Source::Query, name), raw, coerce::choice(raw))
    }

    /// Reads every occurrence of `name`; string rules apply per element.
    pub fn query_list(
        &mut self,
        query: &QueryMap,
        name: &str,
        rules: &StrRules,
    ) -> Option<Vec<String>> {
        self.consumed.insert(name.to_string());
        let values = query.all(name);
        if values.is_empty() {
            return None;
        }

        let mut accepted = Vec::with_capacity(values.len());
        let mut valid = true;
        for (index, raw) in values.into_iter().enumerate() {
            match rules.check(raw) {
                Ok(()) => accepted.push(raw.to_string()),
                Err(violation) => {
                    valid = false;
                    let loc = Loc::of(Source::Query, name).index(index);
                    self.report(loc, violation, Value::String(raw.to_string()));
                }
            }
        }
        valid.then_some(accepted)
    }

    /// Rejects every query key no reader asked for.
    pub fn forbid_extra(&mut self, query: &QueryMap) {
        for key in query.keys() {
            if self.consumed.contains(key) {
                continue;
            }
            let input = query.last(key).map(Value::from).unwrap_or(Value::Null);
            self.report(Loc::of(Source::Query, key), Violation::ExtraForbidden, input);
        }
    }

    /// Runs a custom validator on an already coerced value.
    pub fn after<T, F>(&mut self, loc: Loc, value: Option<T>, validator: F) -> Option<T>
    where
        T: Clone + Into<Value>,
        F: FnOnce(&T) -> Result<(), String>,
    {
        let value = value?;
        match validator(&value) {
            Ok(()) => Some(value),
            Err(message) => {
                self.report(loc, Violation::ValueError { message }, value.into());
                None
            }
        }
    }

    pub fn body<T: FromFields>(&mut self, body: Option<&Value>) -> Option<T> {
        match body {
            Some(value) => self.model(Loc::new(Source::Body), value),
            None => {
                self.report(Loc::new(Source::Body), Violation::Missing, Value::Null);
                None
            }
        }
    }

    /// Body made of several named parameters. An absent body reads as `{}`
    /// so each missing parameter is reported under its own name.
    pub fn embedded_body<T: FromFields>(&mut self, body: Option<&Value>) -> Option<T> {
        let empty = Value::Object(Map::new());
        self.model(Loc::new(Source::Body), body.unwrap_or(&empty))
    }

    /// Absent or `null` bodies read as `Some(None)`.
    pub fn optional_body<T: FromFields>(&mut self, body: Option<&Value>) -> Option<Option<T>> {
        match body {
            None | Some(Value::Null) => Some(None),
            Some(value) => self.model(Loc::new(Source::Body), value).map(Some),
        }
    }

    pub(crate) fn model<T: FromFields>(&mut self, loc: Loc, value: &Value) -> Option<T> {
        match value {
            Value::Object(object) => T::from_fields(&mut Fields::new(self, loc, object)),
            other => {
                self.report(loc, Violation::ModelAttributesType, other.clone());
                None
            }
        }
    }

    /// Turns the collected errors into a 422, or hands back the value.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ApiError> {
        if !self.errors.is_empty() {
            return Err(ApiError::Validation(self.errors));
        }
        value.ok_or(ApiError::Internal("input rejected without an error detail"))
    }

    pub fn done(self) -> Result<(), ApiError> {
        self.finish(Some(()))
    }
}
