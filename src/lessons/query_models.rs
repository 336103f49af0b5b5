//! Query parameter models.
//!
//! A whole [`FilterParams`] model read from the query string, once leniently
//! and once rejecting keys the model does not declare.

use axum::routing::get;
use axum::{Json, Router};

use super::{Lesson, ParamDoc, RouteDoc};
use crate::error::ApiError;
use crate::http::AppState;
use crate::models::FilterParams;
use crate::params::{Checker, QueryMap};

const FILTER_PARAMS: &[ParamDoc] = &[
    ParamDoc::query("limit"),
    ParamDoc::query("offset"),
    ParamDoc::query("order_by"),
    ParamDoc::query("tags"),
];

pub const LESSON: Lesson = Lesson {
    slug: "query-models",
    prefix: "/query-models",
    title: "Query parameter models",
    routes: &[
        RouteDoc {
            method: "GET",
            path: "/items",
            summary: "limit 1..=100, offset >= 0, order_by created_at|updated_at, repeated tags",
            params: FILTER_PARAMS,
        },
        RouteDoc {
            method: "GET",
            path: "/items/noExtras",
            summary: "Same model; undeclared query keys are rejected",
            params: FILTER_PARAMS,
        },
    ],
    router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(read_items))
        .route("/items/noExtras", get(read_items_strict))
}

async fn read_items(query: QueryMap) -> Result<Json<FilterParams>, ApiError> {
    let mut check = Checker::new();
    let filter = FilterParams::from_query(&mut check, &query);
    check.done()?;
    Ok(Json(filter))
}

async fn read_items_strict(query: QueryMap) -> Result<Json<FilterParams>, ApiError> {
    let mut check = Checker::new();
    let filter = FilterParams::from_query(&mut check, &query);
    check.forbid_extra(&query);
    check.done()?;
    Ok(Json(filter))
}
