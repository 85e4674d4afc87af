use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    api::v1::dto::products::ProductsPage,
    error::AppError,
    repos::{Collection, Filter},
    services::pagination::{Pagination, total_pages},
    state::AppState,
};

/// `GET /products?page=&limit=`
pub async fn list_products(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ProductsPage>, AppError> {
    let window = pagination.window();

    let total_products = state.store.count(Collection::Products).await?;
    let data = state
        .store
        .find(Collection::Products, &Filter::new(), Some(window))
        .await?;

    Ok(Json(ProductsPage {
        total_products,
        total_pages: total_pages(total_products, window.limit),
        data,
    }))
}
