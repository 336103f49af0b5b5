//! Lesson routers.
//!
//! Each lesson is an independent endpoint collection mounted under its own
//! prefix. Lessons never call each other; the only shared input is the
//! read-only catalog in [`AppState`].
//!
//! # Layout
//! ```text
//! /lessons             index of every lesson below
//! /path-params/...     typed path segments, enums, catch-all paths
//! /query-params/...    defaults, optional/required params, bool coercion
//! /request-body/...    JSON data models, body + path + query
//! /validations/...     length/pattern constraints, lists, aliases, custom checks
//! /query-models/...    a whole model read from the query string
//! /advanced-body/...   multiple and embedded body parameters
//! ```

pub mod advanced_body;
pub mod path_params;
pub mod query_models;
pub mod query_params;
pub mod request_body;
pub mod validations;

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::ApiError;
use crate::http::AppState;
use crate::params::Source;

/// A mounted lesson and the documentation of its routes.
#[derive(Debug, Serialize)]
pub struct Lesson {
    pub slug: &'static str,
    pub prefix: &'static str,
    pub title: &'static str,
    pub routes: &'static [RouteDoc],
    #[serde(skip)]
    pub router: fn() -> Router<AppState>,
}

#[derive(Debug, Serialize)]
pub struct RouteDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub summary: &'static str,
    pub params: &'static [ParamDoc],
}

/// Documentation of one declared parameter.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParamDoc {
    pub name: &'static str,
    pub location: Source,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<&'static str>,
}

impl ParamDoc {
    const fn new(name: &'static str, location: Source, required: bool) -> Self {
        Self {
            name,
            location,
            required,
            title: None,
            description: None,
            alias: None,
        }
    }

    pub const fn path(name: &'static str) -> Self {
        Self::new(name, Source::Path, true)
    }

    pub const fn query(name: &'static str) -> Self {
        Self::new(name, Source::Query, false)
    }

    pub const fn body(name: &'static str) -> Self {
        Self::new(name, Source::Body, true)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub const fn title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }
}

pub const LESSONS: &[&Lesson] = &[
    &path_params::LESSON,
    &query_params::LESSON,
    &request_body::LESSON,
    &validations::LESSON,
    &query_models::LESSON,
    &advanced_body::LESSON,
];

pub fn find(slug: &str) -> Option<&'static Lesson> {
    LESSONS.iter().copied().find(|lesson| lesson.slug == slug)
}

/// Index routes plus every lesson nested under its prefix.
pub fn router() -> Router<AppState> {
    LESSONS.iter().fold(
        Router::new()
            .route("/lessons", get(list_lessons))
            .route("/lessons/{slug}", get(get_lesson)),
        |router, lesson| router.nest(lesson.prefix, (lesson.router)()),
    )
}

async fn list_lessons() -> Json<&'static [&'static Lesson]> {
    Json(LESSONS)
}

async fn get_lesson(Path(slug): Path<String>) -> Result<Json<&'static Lesson>, ApiError> {
    find(&slug)
        .map(Json)
        .ok_or(ApiError::NotFound("Lesson not found"))
}
