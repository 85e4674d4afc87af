/*
 * Responsibility
 * - /bookings 系 CRUD handler
 * - GET /bookings だけ session gate + ownership check を通す
 *   (gate は routes 側で route_layer、ownership はここ)
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use uuid::Uuid;

use super::documents;
use crate::{
    api::v1::{
        dto::{
            bookings::BookingsQuery,
            documents::{DeleteResponse, InsertResponse, UpdateResponse},
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    repos::{Collection, Document, Filter},
    services::auth::authorize_owner,
    state::AppState,
};

// Bookings carry their owner in this top-level field.
const OWNER_FIELD: &str = "email";

pub async fn create_booking(
    State(state): State<AppState>,
    Json(doc): Json<Document>,
) -> Result<(StatusCode, Json<InsertResponse>), AppError> {
    let res = documents::insert(&state, Collection::Bookings, doc).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn list_bookings(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    let scope = authorize_owner(
        &ctx.principal,
        query.email.as_deref(),
        state.owner_missing_target,
    )?;

    let mut filter = Filter::new();
    if let Some(owner) = scope.owner() {
        filter.insert(OWNER_FIELD.to_string(), Value::String(owner.to_string()));
    }

    let docs = documents::list(&state, Collection::Bookings, &filter).await?;
    Ok(Json(docs))
}

pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<Document>,
) -> Result<Json<UpdateResponse>, AppError> {
    let res = documents::update(&state, Collection::Bookings, id, patch).await?;
    Ok(Json(res))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let res = documents::delete(&state, Collection::Bookings, id).await?;
    Ok(Json(res))
}
