/*
 * Responsibility
 * - /services 系 CRUD handler (認証なし)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use super::documents;
use crate::{
    api::v1::dto::documents::{DeleteResponse, InsertResponse, UpdateResponse},
    error::AppError,
    repos::{Collection, Document, Filter},
    state::AppState,
};

pub async fn create_service(
    State(state): State<AppState>,
    Json(doc): Json<Document>,
) -> Result<(StatusCode, Json<InsertResponse>), AppError> {
    let res = documents::insert(&state, Collection::Services, doc).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, AppError> {
    let docs = documents::list(&state, Collection::Services, &Filter::new()).await?;
    Ok(Json(docs))
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, AppError> {
    let doc = documents::get(&state, Collection::Services, id, "service").await?;
    Ok(Json(doc))
}

pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<Document>,
) -> Result<Json<UpdateResponse>, AppError> {
    let res = documents::update(&state, Collection::Services, id, patch).await?;
    Ok(Json(res))
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let res = documents::delete(&state, Collection::Services, id).await?;
    Ok(Json(res))
}
