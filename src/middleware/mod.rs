/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::session (cookie credential gate), cors, http
 */
pub mod auth;
pub mod cors;
pub mod http;
