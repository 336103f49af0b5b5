//! Query parameter model for filtered listings.

use serde::Serialize;

use crate::models::OrderBy;
use crate::params::{Checker, IntRules, QueryMap, StrRules};

const LIMIT: IntRules = IntRules::new().gt(0).le(100);
const OFFSET: IntRules = IntRules::new().ge(0);

/// Filter read field by field from the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    pub limit: i64,
    pub offset: i64,
    pub order_by: OrderBy,
    pub tags: Vec<String>,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
            order_by: OrderBy::default(),
            tags: Vec::new(),
        }
    }
}

impl FilterParams {
    /// Reads every field, falling back to defaults for absent keys.
    /// Rejected values are recorded on `check`.
    pub fn from_query(check: &mut Checker, query: &QueryMap) -> Self {
        let defaults = Self::default();
        Self {
            limit: check.query_int(query, "limit", &LIMIT).unwrap_or(defaults.limit),
            offset: check.query_int(query, "offset", &OFFSET).unwrap_or(defaults.offset),
            order_by: check
                .query_choice(query, "order_by")
                .unwrap_or(defaults.order_by),
            tags: check
                .query_list(query, "tags", &StrRules::NONE)
                .unwrap_or(defaults.tags),
        }
    }
}
