/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - store: DocumentStore, sessions: SessionTokens, cookie / ownership の方針
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::config::Config;
use crate::repos::DocumentStore;
use crate::services::auth::{MissingTargetPolicy, SessionTokens, build_session_tokens};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub sessions: Arc<SessionTokens>,
    pub session_cookie_name: Arc<str>,
    pub owner_missing_target: MissingTargetPolicy,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        sessions: Arc<SessionTokens>,
        session_cookie_name: impl Into<Arc<str>>,
        owner_missing_target: MissingTargetPolicy,
    ) -> Self {
        Self {
            store,
            sessions,
            session_cookie_name: session_cookie_name.into(),
            owner_missing_target,
        }
    }

    pub fn from_config(config: &Config, store: Arc<dyn DocumentStore>) -> Self {
        Self::new(
            store,
            build_session_tokens(config),
            config.session_cookie_name.as_str(),
            config.owner_missing_target,
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend_name())
            .field("sessions", &self.sessions)
            .field("session_cookie_name", &self.session_cookie_name)
            .field("owner_missing_target", &self.owner_missing_target)
            .finish()
    }
}
