//! Query parameters.
//!
//! Defaults, optional and required parameters, boolean coercion, and path and
//! query parameters mixed on one route.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use super::{Lesson, ParamDoc, RouteDoc};
use crate::catalog::FakeItem;
use crate::error::ApiError;
use crate::http::AppState;
use crate::params::{Checker, IntRules, QueryMap, StrRules};

const LONG_DESCRIPTION: &str = "This is an amazing item that has a long description";
const TRIBUTE_DESCRIPTION: &str = "This is not the greatest description, this is a tribute";

pub const LESSON: Lesson = Lesson {
    slug: "query-params",
    prefix: "/query-params",
    title: "Query parameters",
    routes: &[
        RouteDoc {
            method: "GET",
            path: "/items",
            summary: "Page through the fake item list, skip=0 and limit=10 by default",
            params: &[ParamDoc::query("skip"), ParamDoc::query("limit")],
        },
        RouteDoc {
            method: "GET",
            path: "/items/{item_id}",
            summary: "Optional q echoed when non-empty",
            params: &[ParamDoc::path("item_id"), ParamDoc::query("q")],
        },
        RouteDoc {
            method: "GET",
            path: "/items/typeconv/{item_id}",
            summary: "short accepts 1/true/on/yes and friends in any case",
            params: &[
                ParamDoc::path("item_id"),
                ParamDoc::query("q"),
                ParamDoc::query("short"),
            ],
        },
        RouteDoc {
            method: "GET",
            path: "/users/{user_id}/items/{item_id}",
            summary: "Several path and query parameters, matched by name",
            params: &[
                ParamDoc::path("user_id"),
                ParamDoc::path("item_id"),
                ParamDoc::query("q"),
                ParamDoc::query("short"),
            ],
        },
        RouteDoc {
            method: "GET",
            path: "/items/{item_id}/needy",
            summary: "A query parameter without default is required",
            params: &[ParamDoc::path("item_id"), ParamDoc::query("needy").required()],
        },
    ],
    router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(read_items))
        .route("/items/{item_id}", get(read_item))
        .route("/items/typeconv/{item_id}", get(read_item_typeconv))
        .route("/users/{user_id}/items/{item_id}", get(read_user_item))
        .route("/items/{item_id}/needy", get(read_needy_item))
}

#[derive(Debug, Serialize)]
struct ItemsPage {
    #[serde(rename = "Query_Params")]
    query_params: String,
    #[serde(rename = "Content")]
    content: Vec<FakeItem>,
}

#[derive(Debug, Default, Serialize)]
struct ItemView {
    item_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    needy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
}

/// `q` only counts when non-empty.
fn present(q: Option<String>) -> Option<String> {
    q.filter(|q| !q.is_empty())
}

async fn read_items(
    State(state): State<AppState>,
    query: QueryMap,
) -> Result<Json<ItemsPage>, ApiError> {
    let mut check = Checker::new();
    let skip = check.query_int(&query, "skip", &IntRules::NONE).unwrap_or(0);
    let limit = check.query_int(&query, "limit", &IntRules::NONE).unwrap_or(10);
    check.done()?;

    Ok(Json(ItemsPage {
        query_params: format!("Skip: {}, Limit: {}", skip, limit),
        content: state.catalog.page(skip, limit).to_vec(),
    }))
}

async fn read_item(Path(item_id): Path<String>, query: QueryMap) -> Result<Json<ItemView>, ApiError> {
    let mut check = Checker::new();
    let q = check.query_str(&query, "q", &StrRules::NONE);
    check.done()?;

    Ok(Json(ItemView {
        item_id,
        q: present(q),
        ..Default::default()
    }))
}

async fn read_item_typeconv(
    Path(item_id): Path<String>,
    query: QueryMap,
) -> Result<Json<ItemView>, ApiError> {
    let mut check = Checker::new();
    let q = check.query_str(&query, "q", &StrRules::NONE);
    let short = check.query_bool(&query, "short").unwrap_or(false);
    check.done()?;

    Ok(Json(ItemView {
        item_id,
        q: present(q),
        description: (!short).then_some(LONG_DESCRIPTION),
        ..Default::default()
    }))
}

async fn read_user_item(
    Path((user_id, item_id)): Path<(String, String)>,
    query: QueryMap,
) -> Result<Json<ItemView>, ApiError> {
    let mut check = Checker::new();
    let user_id = check.path_int("user_id", &user_id, &IntRules::NONE);
    let q = check.query_str(&query, "q", &StrRules::NONE);
    let short = check.query_bool(&query, "short").unwrap_or(false);
    let user_id = check.finish(user_id)?;

    Ok(Json(ItemView {
        item_id,
        user_id: Some(user_id),
        q: present(q),
        description: (!short).then_some(TRIBUTE_DESCRIPTION),
        ..Default::default()
    }))
}

async fn read_needy_item(
    Path(item_id): Path<String>,
    query: QueryMap,
) -> Result<Json<ItemView>, ApiError> {
    let mut check = Checker::new();
    let needy = check.query_required_str(&query, "needy", &StrRules::NONE);
    let needy = check.finish(needy)?;

    Ok(Json(ItemView {
        item_id,
        needy: Some(needy),
        ..Default::default()
    }))
}
