//! Request bodies.
//!
//! A JSON data model as the request body, using its fields, and combining it
//! with path and query parameters.

use axum::extract::Path;
use axum::routing::{post, put};
use axum::{Json, Router};
use serde::Serialize;

use super::{Lesson, ParamDoc, RouteDoc};
use crate::error::ApiError;
use crate::http::AppState;
use crate::models::Item;
use crate::params::{Checker, IntRules, JsonBody, QueryMap, StrRules};

pub const LESSON: Lesson = Lesson {
    slug: "request-body",
    prefix: "/request-body",
    title: "Request body",
    routes: &[
        RouteDoc {
            method: "POST",
            path: "/items",
            summary: "Echo an Item body; description and tax may be omitted",
            params: &[ParamDoc::body("item")],
        },
        RouteDoc {
            method: "POST",
            path: "/items/update",
            summary: "Item plus price_with_tax when a tax is given",
            params: &[ParamDoc::body("item")],
        },
        RouteDoc {
            method: "PUT",
            path: "/items/{item_id}",
            summary: "Body, path and query parameters on one route",
            params: &[
                ParamDoc::path("item_id"),
                ParamDoc::body("item"),
                ParamDoc::query("q"),
            ],
        },
    ],
    router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", post(create_item))
        .route("/items/update", post(create_item_with_tax))
        .route("/items/{item_id}", put(update_item))
}

#[derive(Debug, Serialize)]
struct ItemWithTax {
    #[serde(flatten)]
    item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_with_tax: Option<f64>,
}

#[derive(Debug, Serialize)]
struct UpdatedItem {
    item_id: i64,
    #[serde(flatten)]
    item: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,
}

async fn create_item(body: JsonBody) -> Result<Json<Item>, ApiError> {
    let mut check = Checker::new();
    let item = check.body::<Item>(body.value());
    Ok(Json(check.finish(item)?))
}

async fn create_item_with_tax(body: JsonBody) -> Result<Json<ItemWithTax>, ApiError> {
    let mut check = Checker::new();
    let item = check.body::<Item>(body.value());
    let item = check.finish(item)?;

    Ok(Json(ItemWithTax {
        price_with_tax: item.price_with_tax(),
        item,
    }))
}

async fn update_item(
    Path(item_id): Path<String>,
    query: QueryMap,
    body: JsonBody,
) -> Result<Json<UpdatedItem>, ApiError> {
    let mut check = Checker::new();
    let item_id = check.path_int("item_id", &item_id, &IntRules::NONE);
    let q = check.query_str(&query, "q", &StrRules::NONE);
    let item = check.body::<Item>(body.value());
    let (item_id, item) = check.finish(item_id.zip(item))?;

    Ok(Json(UpdatedItem {
        item_id,
        item,
        q: q.filter(|q| !q.is_empty()),
    }))
}
