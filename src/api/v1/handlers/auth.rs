/*
 * Responsibility
 * - POST /auth/access-token: credential を署名して session cookie に載せる
 * - POST /auth/logout: cookie を消すだけ (サーバー側の無効化はしない)
 */
use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    api::v1::dto::auth::{AccessTokenRequest, SuccessResponse},
    error::AppError,
    services::auth::Principal,
    state::AppState,
};

/// HttpOnly, SameSite=None, Secure, Path=/. Max-Age equals the credential's own lifetime.
fn session_cookie(name: &str, value: String, ttl_seconds: u64) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .http_only(true)
        .same_site(SameSite::None)
        .secure(true)
        .path("/")
        .max_age(time::Duration::seconds(
            i64::try_from(ttl_seconds).unwrap_or(i64::MAX),
        ))
        .build()
}

pub async fn issue_access_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<AccessTokenRequest>,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    req.validate().map_err(|e| AppError::invalid_request(e))?;

    // Blank email is the only way this fails.
    let principal =
        Principal::new(req.email).ok_or_else(|| AppError::invalid_request("email is required"))?;
    let token = state.sessions.sign(&principal)?;

    let cookie = session_cookie(
        &state.session_cookie_name,
        token,
        state.sessions.ttl_seconds(),
    );

    Ok((jar.add(cookie), Json(SuccessResponse::ok())))
}

// Always succeeds, cookie or not.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    let mut removal = session_cookie(&state.session_cookie_name, String::new(), 0);
    removal.make_removal();

    (jar.add(removal), Json(SuccessResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_max_age_saturates_instead_of_wrapping() {
        let cookie = session_cookie("token", "v".to_string(), 10_000_000_000_000_000_000);
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(i64::MAX)));

        let cookie = session_cookie("token", "v".to_string(), 7200);
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(7200)));
    }
}
