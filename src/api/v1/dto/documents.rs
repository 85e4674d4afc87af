/*
 * Responsibility
 * - services / bookings の write 系 response DTO
 * - 既存クライアント互換のため camelCase (insertedId, matchedCount ...)
 */
use serde::Serialize;
use uuid::Uuid;

use crate::repos::UpdateOutcome;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl InsertResponse {
    pub fn new(inserted_id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateOutcome> for UpdateResponse {
    fn from(out: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: out.matched,
            modified_count: out.modified,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResponse {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}
