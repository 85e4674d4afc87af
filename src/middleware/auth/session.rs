//! session cookie の credential 検証 → AuthCtx を extensions に入れる
//!
//! - cookie が無い → 401
//! - 署名不一致 / 期限切れ / 形式不正 → 401 (理由はログにだけ残す)
//! - 成功 → `AuthCtx` を extensions に格納して次へ
//!
//! サーバー側に session table は持たない。logout しても発行済み credential は
//! `exp` まで有効なまま。

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Gate the given routes behind the session credential.
///
/// 例：
/// ```ignore
/// let gated = middleware::auth::session::apply(get(list_bookings), state.clone());
/// router.route("/bookings", post(create_booking).merge(gated))
/// ```
pub fn apply(routes: MethodRouter<AppState>, state: AppState) -> MethodRouter<AppState> {
    // route_layer: only matched methods are gated, 405/404 stay untouched
    routes.route_layer(middleware::from_fn_with_state(state, session_middleware))
}

async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(cookie) = jar.get(&state.session_cookie_name) else {
        tracing::debug!("no session credential presented");
        return Err(AppError::Unauthorized);
    };

    let session = match state.sessions.verify(cookie.value()) {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(error = %err, "session credential verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    tracing::debug!(
        principal = %session.principal,
        expires_at = session.expires_at,
        "session credential verified"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::from(session));

    Ok(next.run(req).await)
}
