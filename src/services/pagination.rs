//! Page/limit arithmetic for list endpoints.
use serde::Deserialize;

use crate::repos::Window;

const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

/// Raw `?page=&limit=` query. 1-based page.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl Pagination {
    /// Clamp to sane values: page >= 1, limit in 1..=100.
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.filter(|p| *p > 0).unwrap_or(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (page, limit)
    }

    pub fn window(self) -> Window {
        let (page, limit) = self.normalize();
        Window {
            skip: (page - 1).saturating_mul(limit),
            limit,
        }
    }
}

pub fn total_pages(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit.max(1))
}
