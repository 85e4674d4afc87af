//! Document store interface used by the CRUD handlers.
use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::repos::error::StoreError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Schemaless JSON object. `_id` holds the document id as a string.
pub type Document = Map<String, Value>;

/// Equality match on top-level fields. An empty filter matches everything.
///
/// Values compare whole: an array or object matches only an identical value,
/// never a superset, and a missing field never matches (not even `null`).
pub type Filter = Map<String, Value>;

pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Services,
    Bookings,
    Products,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Bookings => "bookings",
            Self::Products => "products",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skip/limit window for `find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Minimal document store.
///
/// Implementations are shared as `Arc<dyn DocumentStore>` in `AppState`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Insert a document and return its newly assigned id. Any client `_id` is replaced.
    async fn insert_one(&self, collection: Collection, doc: Document) -> StoreResult<Uuid>;

    // Documents matching `filter`, in insertion order.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        window: Option<Window>,
    ) -> StoreResult<Vec<Document>>;

    async fn find_one(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>>;

    // Top-level merge of `patch` into the document (`$set` semantics).
    async fn update_one(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Document,
    ) -> StoreResult<UpdateOutcome>;

    // Returns number of deleted documents (0 or 1).
    async fn delete_one(&self, collection: Collection, id: Uuid) -> StoreResult<u64>;

    async fn count(&self, collection: Collection) -> StoreResult<u64>;
}

/// Stamp `id` into the document as `_id`.
pub fn with_id(mut doc: Document, id: Uuid) -> Document {
    doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    doc
}

pub fn matches(doc: &Document, filter: &Filter) -> bool {
    filter.iter().all(|(k, v)| doc.get(k) == Some(v))
}

/// Apply `patch` onto `doc`, ignoring `_id`. Returns whether anything changed.
pub fn merge_patch(doc: &mut Document, patch: Document) -> bool {
    let mut changed = false;
    for (k, v) in patch {
        if k == ID_FIELD {
            continue;
        }
        if doc.get(&k) != Some(&v) {
            doc.insert(k, v);
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn obj(v: Value) -> Document {
        match v {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(matches(&obj(json!({"a": 1})), &Filter::new()));
    }

    #[test]
    fn filter_is_exact_equality() {
        let doc = obj(json!({"email": "a@x.com", "price": 10}));
        assert!(matches(&doc, &obj(json!({"email": "a@x.com"}))));
        assert!(!matches(&doc, &obj(json!({"email": "A@x.com"}))));
        assert!(!matches(&doc, &obj(json!({"missing": null}))));
    }

    #[test]
    fn nested_values_must_match_whole() {
        let doc = obj(json!({"tags": ["a", "b"], "car": {"make": "VW", "year": 2019}}));
        assert!(!matches(&doc, &obj(json!({"tags": ["a"]}))));
        assert!(!matches(&doc, &obj(json!({"car": {"make": "VW"}}))));
        assert!(matches(&doc, &obj(json!({"tags": ["a", "b"]}))));
    }

    #[test]
    fn merge_patch_keeps_id_and_reports_changes() {
        let mut doc = obj(json!({"_id": "keep", "status": "pending"}));

        let changed = merge_patch(&mut doc, obj(json!({"_id": "other", "status": "confirmed"})));
        assert!(changed);
        assert_eq!(doc["_id"], "keep");
        assert_eq!(doc["status"], "confirmed");

        let changed = merge_patch(&mut doc, obj(json!({"status": "confirmed"})));
        assert!(!changed);
    }
}
