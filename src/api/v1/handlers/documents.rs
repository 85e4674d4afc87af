/*
 * Responsibility
 * - services / bookings で共通の document CRUD (store への pass-through)
 * - resource 名は NotFound のメッセージにだけ使う
 */
use uuid::Uuid;

use crate::{
    api::v1::dto::documents::{DeleteResponse, InsertResponse, UpdateResponse},
    error::AppError,
    repos::{Collection, Document, Filter},
    state::AppState,
};

pub(super) async fn insert(
    state: &AppState,
    collection: Collection,
    doc: Document,
) -> Result<InsertResponse, AppError> {
    let id = state.store.insert_one(collection, doc).await?;
    tracing::debug!(%collection, %id, "document inserted");
    Ok(InsertResponse::new(id))
}

pub(super) async fn list(
    state: &AppState,
    collection: Collection,
    filter: &Filter,
) -> Result<Vec<Document>, AppError> {
    Ok(state.store.find(collection, filter, None).await?)
}

pub(super) async fn get(
    state: &AppState,
    collection: Collection,
    id: Uuid,
    resource: &'static str,
) -> Result<Document, AppError> {
    state
        .store
        .find_one(collection, id)
        .await?
        .ok_or(AppError::NotFound(resource))
}

pub(super) async fn update(
    state: &AppState,
    collection: Collection,
    id: Uuid,
    patch: Document,
) -> Result<UpdateResponse, AppError> {
    let out = state.store.update_one(collection, id, patch).await?;
    tracing::debug!(%collection, %id, matched = out.matched, modified = out.modified, "document updated");
    Ok(out.into())
}

pub(super) async fn delete(
    state: &AppState,
    collection: Collection,
    id: Uuid,
) -> Result<DeleteResponse, AppError> {
    let deleted = state.store.delete_one(collection, id).await?;
    Ok(DeleteResponse::new(deleted))
}
