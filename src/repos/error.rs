/**
 * Responsibility
 * - document store が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("migration error")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    // A stored body that is no longer a JSON object.
    #[error("corrupt document: {0}")]
    Corrupt(String),
}
