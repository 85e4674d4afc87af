/*
 * Responsibility
 * - document store の公開インターフェース (trait + backend)
 * - DATABASE_URL の有無で backend を選ぶ
 */
use std::sync::Arc;

pub mod document_store;
pub mod error;
pub mod memory;
pub mod postgres;

pub use document_store::{Collection, Document, DocumentStore, Filter, UpdateOutcome, Window};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;

pub async fn build_store(database_url: Option<&str>) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match database_url {
        Some(url) => Ok(Arc::new(PgStore::connect(url).await?)),
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
