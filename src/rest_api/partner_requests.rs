//! # Partner Request Routes
//!
//! Partner requests belong to a user by `userEmail`. The owner is an
//! unchecked reference: updates and deletes do not verify it.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use mongodb::bson::{doc, Bson, DateTime};
use serde_json::{Map, Value};
use tracing::debug;

use crate::store::FindOptions;

use super::document::{
    bson_to_json, document_to_json, documents_to_json, is_present, json_to_document,
    object_id_from_path,
};
use super::errors::{RestError, RestResult};
use super::parser::parse_user_email;
use super::response::{InsertedResponse, MessageResponse};
use super::state::AppState;

/// Field holding the owning user's email
pub const OWNER_FIELD: &str = "userEmail";

/// Field stamped on every update
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Create partner request routes
pub fn partner_request_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/partner-request",
            get(list_partner_requests_handler).post(create_partner_request_handler),
        )
        .route(
            "/partner-request/{id}",
            patch(update_partner_request_handler).delete(delete_partner_request_handler),
        )
        .with_state(state)
}

async fn list_partner_requests_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<Value>> {
    let user_email = parse_user_email(&query)?;

    let requests = state
        .store
        .find(
            &state.collections.partner_requests,
            doc! { OWNER_FIELD: user_email },
            FindOptions::new(),
        )
        .await
        .map_err(|e| RestError::store("Failed to fetch partner requests", e))?;

    Ok(Json(documents_to_json(requests)))
}

async fn create_partner_request_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> RestResult<(StatusCode, Json<InsertedResponse>)> {
    let Json(body) = body?;
    if !is_present(body.get(OWNER_FIELD)) || !is_present(body.get("partnerName")) {
        return Err(RestError::MissingFields);
    }

    let document = json_to_document(body)?;
    let inserted_id = state
        .store
        .insert_one(&state.collections.partner_requests, document)
        .await
        .map_err(|e| RestError::store("Failed to create partner request", e))?;

    Ok((
        StatusCode::CREATED,
        Json(InsertedResponse::new(bson_to_json(inserted_id))),
    ))
}

/// Merge the body into the request and stamp `updatedAt`
async fn update_partner_request_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> RestResult<Json<Value>> {
    let oid = object_id_from_path(id, "Invalid ID format")?;
    let Json(updates) = body?;

    let mut set = json_to_document(updates)?;
    set.insert(UPDATED_AT_FIELD, Bson::DateTime(DateTime::now()));

    let updated = state
        .store
        .find_one_and_update(&state.collections.partner_requests, doc! { "_id": oid }, set)
        .await
        .map_err(|e| RestError::store_with_details("Server error", e))?;

    match updated {
        Some(document) => Ok(Json(document_to_json(document))),
        None => {
            debug!(id = %oid, "Partner request not found for update");
            // No ownership check exists; the message covers both cases
            Err(RestError::NotFound("Request not found or you don't own it"))
        }
    }
}

async fn delete_partner_request_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> RestResult<Json<MessageResponse>> {
    let oid = object_id_from_path(id, "Invalid request ID")?;

    let deleted = state
        .store
        .delete_one(&state.collections.partner_requests, doc! { "_id": oid })
        .await
        .map_err(|e| RestError::store("Failed to delete request", e))?;

    if deleted == 0 {
        return Err(RestError::NotFound("Request not found"));
    }

    Ok(Json(MessageResponse::new("Request deleted successfully")))
}
