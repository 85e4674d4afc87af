/*
 * Responsibility
 * - DATABASE_URL が無いときの in-process document store (dev / tests)
 * - プロセス終了で内容は消える
 */
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::document_store::{
    Collection, Document, DocumentStore, Filter, ID_FIELD, StoreResult, UpdateOutcome, Window,
    matches, merge_patch, with_id,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    // Per collection, in insertion order.
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn has_id(doc: &Document, id: Uuid) -> bool {
    doc.get(ID_FIELD).and_then(|v| v.as_str()) == Some(id.to_string().as_str())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        let mut guard = self.collections.write().await;
        guard.entry(collection).or_default().push(with_id(doc, id));
        Ok(id)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        window: Option<Window>,
    ) -> StoreResult<Vec<Document>> {
        let guard = self.collections.read().await;
        let Some(docs) = guard.get(&collection) else {
            return Ok(Vec::new());
        };

        let matching = docs.iter().filter(|d| matches(d, filter));
        let out = match window {
            Some(w) => matching
                .skip(usize::try_from(w.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(w.limit).unwrap_or(usize::MAX))
                .cloned()
                .collect(),
            None => matching.cloned().collect(),
        };
        Ok(out)
    }

    async fn find_one(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| has_id(d, id)))
            .cloned())
    }

    async fn update_one(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Document,
    ) -> StoreResult<UpdateOutcome> {
        let mut guard = self.collections.write().await;
        let Some(doc) = guard
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| has_id(d, id)))
        else {
            return Ok(UpdateOutcome::default());
        };

        let modified = merge_patch(doc, patch);
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn delete_one(&self, collection: Collection, id: Uuid) -> StoreResult<u64> {
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(0);
        };

        match docs.iter().position(|d| has_id(d, id)) {
            Some(idx) => {
                docs.remove(idx);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        let guard = self.collections.read().await;
        Ok(guard.get(&collection).map_or(0, |docs| docs.len() as u64))
    }
}
