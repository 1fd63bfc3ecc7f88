//! # User Routes
//!
//! Users are created and read through this layer, never updated or deleted.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use mongodb::bson::doc;
use serde_json::{Map, Value};

use crate::store::{FindOptions, SortKey};

use super::document::{
    bson_to_json, document_to_json, documents_to_json, json_to_document, object_id_from_path,
};
use super::errors::{RestError, RestResult};
use super::parser::parse_top_rated_limit;
use super::response::InsertedResponse;
use super::state::AppState;

/// Fields returned by the top-rated listing, besides `_id`
pub const TOP_RATED_PROJECTION: [&str; 5] = ["profileimage", "name", "subject", "skills", "rating"];

/// Create user routes
pub fn user_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/user", get(list_users_handler).post(create_user_handler))
        .route("/user/top-rated", get(top_rated_users_handler))
        .route("/user/{id}", get(get_user_handler))
        .with_state(state)
}

/// List every user
async fn list_users_handler(State(state): State<Arc<AppState>>) -> RestResult<Json<Value>> {
    let users = state
        .store
        .find(&state.collections.users, doc! {}, FindOptions::new())
        .await
        .map_err(|e| RestError::store("Failed to fetch users", e))?;

    Ok(Json(documents_to_json(users)))
}

/// Highest rated users first. Ties are ordered by `_id` so results are reproducible.
async fn top_rated_users_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<Value>> {
    let options = FindOptions::new()
        .projection(TOP_RATED_PROJECTION)
        .sort(SortKey::desc("rating"))
        .sort(SortKey::asc("_id"))
        .limit(parse_top_rated_limit(&query));

    let users = state
        .store
        .find(&state.collections.users, doc! {}, options)
        .await
        .map_err(|e| RestError::store("Failed to fetch top-rated users", e))?;

    Ok(Json(documents_to_json(users)))
}

async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> RestResult<Json<Value>> {
    let oid = object_id_from_path(id, "Invalid user ID")?;

    let user = state
        .store
        .find_one(&state.collections.users, doc! { "_id": oid })
        .await
        .map_err(|e| RestError::store("Failed to fetch user", e))?
        .ok_or(RestError::NotFound("User not found"))?;

    Ok(Json(document_to_json(user)))
}

/// The body is stored verbatim
async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> RestResult<(StatusCode, Json<InsertedResponse>)> {
    let Json(body) = body?;
    let document = json_to_document(body)?;

    let inserted_id = state
        .store
        .insert_one(&state.collections.users, document)
        .await
        .map_err(|e| RestError::store("Failed to create user profile", e))?;

    Ok((
        StatusCode::CREATED,
        Json(InsertedResponse::new(bson_to_json(inserted_id))),
    ))
}
