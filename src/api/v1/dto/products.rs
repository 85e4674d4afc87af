use serde::Serialize;

use crate::repos::Document;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsPage {
    pub total_products: u64,
    pub total_pages: u64,
    pub data: Vec<Document>,
}
