/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /auth, /services, /bookings, /products
 * - session gate が必要な route (GET /bookings) はここで route_layer を掛ける
 */
use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::middleware::auth::session;
use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{issue_access_token, logout},
    bookings::{create_booking, delete_booking, list_bookings, update_booking},
    health::health,
    products::list_products,
    services::{create_service, delete_service, get_service, list_services, update_service},
};

pub fn routes(state: AppState) -> Router<AppState> {
    let list_bookings_gated = session::apply(get(list_bookings), state);

    Router::new()
        .route("/health", get(health))
        .route("/auth/access-token", post(issue_access_token))
        .route("/auth/logout", post(logout))
        .route("/services", get(list_services).post(create_service))
        .route(
            "/services/{id}",
            get(get_service).patch(update_service).delete(delete_service),
        )
        .route("/bookings", post(create_booking).merge(list_bookings_gated))
        .route(
            "/bookings/{id}",
            patch(update_booking).delete(delete_booking),
        )
        .route("/products", get(list_products))
}
