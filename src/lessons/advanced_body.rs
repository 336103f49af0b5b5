//! Multiple body parameters.
//!
//! Optional bodies, several models in one body, a singular value next to
//! them, and a single model embedded under its own key.

use axum::extract::Path;
use axum::routing::{post, put};
use axum::{Json, Router};
use serde::Serialize;

use super::{Lesson, ParamDoc, RouteDoc};
use crate::error::ApiError;
use crate::http::AppState;
use crate::models::{Item, User};
use crate::params::{Checker, Fields, FromFields, IntRules, JsonBody, QueryMap, StrRules};

const ITEM_ID: IntRules = IntRules::new().ge(0).le(1000);

pub const LESSON: Lesson = Lesson {
    slug: "advanced-body",
    prefix: "/advanced-body",
    title: "Body with multiple parameters",
    routes: &[
        RouteDoc {
            method: "PUT",
            path: "/items/{item_id}",
            summary: "item_id between 0 and 1000, optional Item body",
            params: &[
                ParamDoc::path("item_id").title("The ID of the item to get"),
                ParamDoc::query("q"),
                ParamDoc::body("item").optional(),
            ],
        },
        RouteDoc {
            method: "PUT",
            path: "/items/{item_id}/with-user",
            summary: "Body holds an item and a user under their own keys",
            params: &[
                ParamDoc::path("item_id"),
                ParamDoc::body("item"),
                ParamDoc::body("user"),
            ],
        },
        RouteDoc {
            method: "PUT",
            path: "/items/{item_id}/importance",
            summary: "A singular importance value next to the two models",
            params: &[
                ParamDoc::path("item_id"),
                ParamDoc::body("item"),
                ParamDoc::body("user"),
                ParamDoc::body("importance"),
                ParamDoc::query("q"),
            ],
        },
        RouteDoc {
            method: "POST",
            path: "/items",
            summary: "A single Item embedded as {\"item\": ...}",
            params: &[ParamDoc::body("item")],
        },
    ],
    router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", post(create_embedded_item))
        .route("/items/{item_id}", put(update_item))
        .route("/items/{item_id}/with-user", put(update_item_with_user))
        .route("/items/{item_id}/importance", put(update_item_importance))
}

struct ItemAndUser {
    item: Item,
    user: User,
}

impl FromFields for ItemAndUser {
    fn from_fields(fields: &mut Fields<'_>) -> Option<Self> {
        // Reported in the order the handler declares them: user, then item.
        let user = fields.model("user");
        let item = fields.model("item");
        Some(ItemAndUser {
            item: item?,
            user: user?,
        })
    }
}

struct Importance {
    item: Item,
    user: User,
    importance: i64,
}

impl FromFields for Importance {
    fn from_fields(fields: &mut Fields<'_>) -> Option<Self> {
        let user = fields.model("user");
        let item = fields.model("item");
        let importance = fields.int("importance");
        Some(Importance {
            item: item?,
            user: user?,
            importance: importance?,
        })
    }
}

#[derive(Debug, Serialize)]
struct Embedded {
    item: Item,
}

impl FromFields for Embedded {
    fn from_fields(fields: &mut Fields<'_>) -> Option<Self> {
        fields.model("item").map(|item| Embedded { item })
    }
}

#[derive(Debug, Serialize)]
struct Updated {
    item_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    importance: Option<i64>,
}

impl Updated {
    fn new(item_id: i64) -> Self {
        Self {
            item_id,
            q: None,
            item: None,
            user: None,
            importance: None,
        }
    }
}

async fn update_item(
    Path(item_id): Path<String>,
    query: QueryMap,
    body: JsonBody,
) -> Result<Json<Updated>, ApiError> {
    let mut check = Checker::new();
    let item_id = check.path_int("item_id", &item_id, &ITEM_ID);
    let q = check.query_str(&query, "q", &StrRules::NONE);
    let item = check.optional_body::<Item>(body.value());
    let (item_id, item) = check.finish(item_id.zip(item))?;

    Ok(Json(Updated {
        q: q.filter(|q| !q.is_empty()),
        item,
        ..Updated::new(item_id)
    }))
}

async fn update_item_with_user(
    Path(item_id): Path<String>,
    body: JsonBody,
) -> Result<Json<Updated>, ApiError> {
    let mut check = Checker::new();
    let item_id = check.path_int("item_id", &item_id, &IntRules::NONE);
    let parts = check.embedded_body::<ItemAndUser>(body.value());
    let (item_id, parts) = check.finish(item_id.zip(parts))?;

    Ok(Json(Updated {
        item: Some(parts.item),
        user: Some(parts.user),
        ..Updated::new(item_id)
    }))
}

async fn update_item_importance(
    Path(item_id): Path<String>,
    query: QueryMap,
    body: JsonBody,
) -> Result<Json<Updated>, ApiError> {
    let mut check = Checker::new();
    let item_id = check.path_int("item_id", &item_id, &IntRules::NONE);
    let q = check.query_str(&query, "q", &StrRules::NONE);
    let parts = check.embedded_body::<Importance>(body.value());
    let (item_id, parts) = check.finish(item_id.zip(parts))?;

    Ok(Json(Updated {
        q: q.filter(|q| !q.is_empty()),
        item: Some(parts.item),
        user: Some(parts.user),
        importance: Some(parts.importance),
        ..Updated::new(item_id)
    }))
}

async fn create_embedded_item(body: JsonBody) -> Result<Json<Embedded>, ApiError> {
    let mut check = Checker::new();
    let embedded = check.embedded_body::<Embedded>(body.value());
    Ok(Json(check.finish(embedded)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_importance_collects_nested_errors() {
        let body = json!({"item": {"name": "Foo"}, "user": {}, "importance": "high"});
        let mut check = Checker::new();
        assert!(check.embedded_body::<Importance>(Some(&body)).is_none());

        let locs: Vec<_> = check
            .errors()
            .iter()
            .map(|e| serde_json::to_value(&e.loc).unwrap())
            .collect();
        assert_eq!(
            locs,
            vec![
                json!(["body", "user", "username"]),
                json!(["body", "item", "price"]),
                json!(["body", "importance"]),
            ]
        );
    }

    #[test]
    fn test_item_and_user_reports_user_first() {
        let mut check = Checker::new();
        assert!(check.embedded_body::<ItemAndUser>(None).is_none());

        let locs: Vec<_> = check
            .errors()
            .iter()
            .map(|e| serde_json::to_value(&e.loc).unwrap())
            .collect();
        assert_eq!(locs, vec![json!(["body", "user"]), json!(["body", "item"])]);
    }

    #[test]
    fn test_updated_skips_absent_parts() {
        let value = serde_json::to_value(Updated::new(5)).unwrap();
        assert_eq!(value, json!({"item_id": 5}));
    }
}
