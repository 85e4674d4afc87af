/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - session middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 */
use crate::services::auth::{Principal, VerifiedSession};

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `principal` は credential に埋め込まれた email
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub principal: Principal,
}

impl From<VerifiedSession> for AuthCtx {
    fn from(session: VerifiedSession) -> Self {
        Self {
            principal: session.principal,
        }
    }
}
