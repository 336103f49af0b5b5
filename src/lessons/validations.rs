//! Query parameter validations.
//!
//! Length and pattern constraints, required parameters, list parameters with
//! defaults, documentation metadata, aliases and a custom after-validator.

use std::sync::LazyLock;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use regex::Regex;
use serde::Serialize;

use super::{Lesson, ParamDoc, RouteDoc};
use crate::catalog::{check_media_id, ListedItem};
use crate::error::ApiError;
use crate::http::AppState;
use crate::params::{Checker, Loc, QueryMap, Source, StrRules};

static FIXED_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^fixedquery$").expect("static pattern is valid"));

const ALIAS: &str = "item-query";

fn fixed_query() -> StrRules {
    StrRules::new()
        .min_length(3)
        .max_length(50)
        .pattern(&FIXED_QUERY)
}

pub const LESSON: Lesson = Lesson {
    slug: "validations",
    prefix: "/validations",
    title: "Query parameters and string validations",
    routes: &[
        RouteDoc {
            method: "GET",
            path: "/items",
            summary: "Optional q without constraints",
            params: &[ParamDoc::query("q")],
        },
        RouteDoc {
            method: "GET",
            path: "/items/validated",
            summary: "Optional q of at most 50 characters",
            params: &[ParamDoc::query("q")],
        },
        RouteDoc {
            method: "GET",
            path: "/items/pattern",
            summary: "Optional q, 3 to 50 characters matching ^fixedquery$",
            params: &[ParamDoc::query("q")],
        },
        RouteDoc {
            method: "GET",
            path: "/items/required",
            summary: "Same constraints, but q is required",
            params: &[ParamDoc::query("q").required()],
        },
        RouteDoc {
            method: "GET",
            path: "/items/required-nullable",
            summary: "q must be sent and have at least 3 characters",
            params: &[ParamDoc::query("q").required()],
        },
        RouteDoc {
            method: "GET",
            path: "/items/list",
            summary: "Repeated q read as a list, [\"foo\", \"bar\"] when absent",
            params: &[ParamDoc::query("q")],
        },
        RouteDoc {
            method: "GET",
            path: "/items/metadata",
            summary: "q carries a title and description",
            params: &[ParamDoc::query("q").title("Query string").description("Query")],
        },
        RouteDoc {
            method: "GET",
            path: "/items/alias",
            summary: "List parameter sent as item-query instead of q",
            params: &[ParamDoc::query("q").alias(ALIAS)],
        },
        RouteDoc {
            method: "GET",
            path: "/items/lookup",
            summary: "id must start with isbn- or imdb-",
            params: &[ParamDoc::query("id")],
        },
    ],
    router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(read_items))
        .route("/items/validated", get(read_items_validated))
        .route("/items/pattern", get(read_items_pattern))
        .route("/items/required", get(read_items_required))
        .route("/items/required-nullable", get(read_items_required_nullable))
        .route("/items/list", get(read_items_list))
        .route("/items/metadata", get(read_items_metadata))
        .route("/items/alias", get(read_items_alias))
        .route("/items/lookup", get(lookup_item))
}

#[derive(Debug, Serialize)]
struct Listing<Q> {
    items: Vec<ListedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<Q>,
}

impl<Q> Listing<Q> {
    fn new(state: &AppState, q: Option<Q>) -> Self {
        Self {
            items: state.catalog.listing().to_vec(),
            q,
        }
    }
}

#[derive(Debug, Serialize)]
struct MediaEntry {
    id: String,
    name: Option<&'static str>,
}

/// Optional string q with `rules`, echoed when non-empty.
fn optional_q(
    state: &AppState,
    query: &QueryMap,
    rules: &StrRules,
) -> Result<Json<Listing<String>>, ApiError> {
    let mut check = Checker::new();
    let q = check.query_str(query, "q", rules);
    check.done()?;
    Ok(Json(Listing::new(state, q.filter(|q| !q.is_empty()))))
}

fn required_q(
    state: &AppState,
    query: &QueryMap,
    rules: &StrRules,
) -> Result<Json<Listing<String>>, ApiError> {
    let mut check = Checker::new();
    let q = check.query_required_str(query, "q", rules);
    let q = check.finish(q)?;
    Ok(Json(Listing::new(state, Some(q))))
}

async fn read_items(
    State(state): State<AppState>,
    query: QueryMap,
) -> Result<Json<Listing<String>>, ApiError> {
    optional_q(&state, &query, &StrRules::NONE)
}

async fn read_items_validated(
    State(state): State<AppState>,
    query: QueryMap,
) -> Result<Json<Listing<String>>, ApiError> {
    optional_q(&state, &query, &StrRules::new().max_length(50))
}

async fn read_items_pattern(
    State(state): State<AppState>,
    query: QueryMap,
) -> Result<Json<Listing<String>>, ApiError> {
    optional_q(&state, &query, &fixed_query())
}

async fn read_items_required(
    State(state): State<AppState>,
    query: QueryMap,
) -> Result<Json<Listing<String>>, ApiError> {
    required_q(&state, &query, &fixed_query())
}

async fn read_items_required_nullable(
    State(state): State<AppState>,
    query: QueryMap,
) -> Result<Json<Listing<String>>, ApiError> {
    required_q(&state, &query, &StrRules::new().min_length(3))
}

async fn read_items_metadata(
    State(state): State<AppState>,
    query: QueryMap,
) -> Result<Json<Listing<String>>, ApiError> {
    optional_q(&state, &query, &StrRules::new().min_length(3))
}

async fn read_items_list(
    State(state): State<AppState>,
    query: QueryMap,
) -> Result<Json<Listing<Vec<String>>>, ApiError> {
    let mut check = Checker::new();
    let q = check.query_list(&query, "q", &fixed_query());
    check.done()?;

    let q = q.unwrap_or_else(|| vec!["foo".to_string(), "bar".to_string()]);
    Ok(Json(Listing::new(&state, Some(q))))
}

async fn read_items_alias(
    State(state): State<AppState>,
    query: QueryMap,
) -> Result<Json<Listing<Vec<String>>>, ApiError> {
    let mut check = Checker::new();
    let q = check.query_list(&query, ALIAS, &StrRules::NONE);
    check.done()?;
    Ok(Json(Listing::new(&state, q)))
}

async fn lookup_item(State(state): State<AppState>, query: QueryMap) -> Result<Response, ApiError> {
    let mut check = Checker::new();
    let id = check.query_str(&query, "id", &StrRules::NONE);
    let id = check.after(Loc::of(Source::Query, "id"), id, |id: &String| {
        check_media_id(id)
    });
    check.done()?;

    Ok(match id {
        Some(id) => {
            let name = state.catalog.media_name(&id);
            Json(MediaEntry { id, name }).into_response()
        }
        None => Json(state.catalog.media().to_vec()).into_response(),
    })
}
