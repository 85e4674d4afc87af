/*
 * Responsibility
 * - documents テーブル (collection + JSONB body) を使った DocumentStore 実装
 * - body には `_id` も含めて保存する (find で書き戻し不要)
 * - filter は top-level key ごとの等値比較。`@>` は GIN index を効かせるための絞り込み
 */
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, postgres::PgPoolOptions, types::Json};
use uuid::Uuid;

use crate::repos::document_store::{
    Collection, Document, DocumentStore, Filter, StoreResult, UpdateOutcome, Window, merge_patch,
    with_id,
};
use crate::repos::error::StoreError;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and apply `migrations/`.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }
}

// Windows beyond i64 saturate; OFFSET i64::MAX just yields no rows.
fn sql_window(window: Option<Window>) -> (i64, Option<i64>) {
    match window {
        Some(w) => (
            i64::try_from(w.skip).unwrap_or(i64::MAX),
            Some(i64::try_from(w.limit).unwrap_or(i64::MAX)),
        ),
        // LIMIT NULL = no limit
        None => (0, None),
    }
}

fn into_document(body: Json<Value>) -> StoreResult<Document> {
    match body.0 {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Corrupt(format!("expected object, got {other}"))),
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        let body = Value::Object(with_id(doc, id));

        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(collection.as_str())
        .bind(Json(body))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        window: Option<Window>,
    ) -> StoreResult<Vec<Document>> {
        let (offset, limit) = sql_window(window);

        let rows = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT body
            FROM documents
            WHERE collection = $1
              AND body @> $2
              AND NOT EXISTS (
                  SELECT 1
                  FROM jsonb_each($2) AS f
                  WHERE body -> f.key IS DISTINCT FROM f.value
              )
            ORDER BY seq
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(collection.as_str())
        .bind(Json(Value::Object(filter.clone())))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(into_document).collect()
    }

    async fn find_one(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT body
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(into_document).transpose()
    }

    async fn update_one(
        &self,
        collection: Collection,
        id: Uuid,
        patch: Document,
    ) -> StoreResult<UpdateOutcome> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT body
            FROM documents
            WHERE collection = $1 AND id = $2
            FOR UPDATE
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(body) = row else {
            return Ok(UpdateOutcome::default());
        };

        let mut doc = into_document(body)?;
        if !merge_patch(&mut doc, patch) {
            return Ok(UpdateOutcome {
                matched: 1,
                modified: 0,
            });
        }

        sqlx::query(
            r#"
            UPDATE documents
            SET body = $3
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(Value::Object(doc)))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(UpdateOutcome {
            matched: 1,
            modified: 1,
        })
    }

    async fn delete_one(&self, collection: Collection, id: Uuid) -> StoreResult<u64> {
        let res = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        let n: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM documents
            WHERE collection = $1
            "#,
        )
        .bind(collection.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(n as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_maps_to_offset_and_limit() {
        assert_eq!(sql_window(None), (0, None));
        assert_eq!(
            sql_window(Some(Window { skip: 20, limit: 10 })),
            (20, Some(10))
        );
    }

    #[test]
    fn oversized_window_saturates_instead_of_going_negative() {
        let (offset, limit) = sql_window(Some(Window {
            skip: 9_999_999_999_999_999_900,
            limit: u64::MAX,
        }));
        assert_eq!(offset, i64::MAX);
        assert_eq!(limit, Some(i64::MAX));
    }
}
