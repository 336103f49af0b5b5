//! Path parameters.
//!
//! Shows typed segments, static routes taking precedence over dynamic ones,
//! enum-restricted segments and catch-all paths.

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use super::{Lesson, ParamDoc, RouteDoc};
use crate::error::ApiError;
use crate::http::AppState;
use crate::models::ModelName;
use crate::params::{Checker, IntRules};

pub const LESSON: Lesson = Lesson {
    slug: "path-params",
    prefix: "/path-params",
    title: "Path parameters",
    routes: &[
        RouteDoc {
            method: "GET",
            path: "/items/{item_id}",
            summary: "Echo an integer item id",
            params: &[ParamDoc::path("item_id")],
        },
        RouteDoc {
            method: "GET",
            path: "/users/me",
            summary: "Static route, wins over /users/{user_id}",
            params: &[],
        },
        RouteDoc {
            method: "GET",
            path: "/users/{user_id}",
            summary: "Echo a string user id; /users/you lands here too",
            params: &[ParamDoc::path("user_id")],
        },
        RouteDoc {
            method: "GET",
            path: "/users",
            summary: "First registration of a duplicated route is the one served",
            params: &[],
        },
        RouteDoc {
            method: "GET",
            path: "/models/{model_name}",
            summary: "Path segment restricted to alexnet, resnet or lenet",
            params: &[ParamDoc::path("model_name")],
        },
        RouteDoc {
            method: "GET",
            path: "/files/{*file_path}",
            summary: "Catch-all segment that may contain slashes; /files/ gives an empty path",
            params: &[ParamDoc::path("file_path")],
        },
    ],
    router,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items/{item_id}", get(read_item))
        .route("/users/me", get(read_user_me))
        .route("/users/{user_id}", get(read_user))
        .route("/users", get(list_users))
        .route("/models/{model_name}", get(get_model))
        .route("/files/{*file_path}", get(read_file))
        // A catch-all never matches an empty remainder, and `/files/` reaches
        // the router with its trailing slash already trimmed.
        .route("/files", get(|| read_file(Path(String::new()))))
}

#[derive(Debug, Serialize)]
struct ItemId {
    item_id: i64,
}

#[derive(Debug, Serialize)]
struct UserId {
    user_id: String,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    model_name: ModelName,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct FilePath {
    file_path: String,
}

async fn read_item(Path(item_id): Path<String>) -> Result<Json<ItemId>, ApiError> {
    let mut check = Checker::new();
    let item_id = check.path_int("item_id", &item_id, &IntRules::NONE);
    Ok(Json(ItemId {
        item_id: check.finish(item_id)?,
    }))
}

async fn read_user_me() -> Json<UserId> {
    Json(UserId {
        user_id: "the current user".to_string(),
    })
}

async fn read_user(Path(user_id): Path<String>) -> Json<UserId> {
    Json(UserId { user_id })
}

async fn list_users() -> Json<[&'static str; 2]> {
    Json(["Elmo", "Bert"])
}

async fn get_model(Path(model_name): Path<String>) -> Result<Json<ModelInfo>, ApiError> {
    let mut check = Checker::new();
    let model_name = check.path_choice::<ModelName>("model_name", &model_name);
    let model_name = check.finish(model_name)?;
    Ok(Json(ModelInfo {
        model_name,
        message: model_name.blurb(),
    }))
}

async fn read_file(Path(file_path): Path<String>) -> Json<FilePath> {
    Json(FilePath { file_path })
}
