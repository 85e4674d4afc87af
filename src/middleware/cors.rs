//! CORS policy for the browser client.
//!
//! The session credential travels as a cookie, so CORS must allow credentials,
//! which rules out wildcard origins, methods and headers.
//!
//! Policy:
//! - Production: exact allowlist from `CORS_ALLOWED_ORIGINS`.
//! - Development: the allowlist plus any `http://localhost:*` / `http://127.0.0.1:*` origin.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;

fn is_local_dev_origin(origin: &[u8]) -> bool {
    ["http://localhost", "http://127.0.0.1"]
        .iter()
        .any(|prefix| {
            origin
                .strip_prefix(prefix.as_bytes())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(b":"))
        })
}

pub fn layer(config: &Config) -> CorsLayer {
    let allowed: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();
    let allow_local = !config.app_env.is_production();

    let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _req| {
        allowed.iter().any(|v| v == origin) || (allow_local && is_local_dev_origin(origin.as_bytes()))
    });

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(60 * 10))
}

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}

#[cfg(test)]
mod tests {
    use super::is_local_dev_origin;

    #[test]
    fn local_dev_origins() {
        assert!(is_local_dev_origin(b"http://localhost:5173"));
        assert!(is_local_dev_origin(b"http://localhost"));
        assert!(is_local_dev_origin(b"http://127.0.0.1:3000"));
        assert!(!is_local_dev_origin(b"http://localhost.evil.com"));
        assert!(!is_local_dev_origin(b"https://example.com"));
    }
}
