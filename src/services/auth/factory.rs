/// Factory: build `SessionTokens` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::SessionTokens;

pub fn build_session_tokens(config: &Config) -> Arc<SessionTokens> {
    Arc::new(SessionTokens::new(
        &config.token_secret,
        config.token_issuer.clone(),
        config.token_ttl_seconds,
    ))
}
