use serde::Deserialize;
use utoipa::IntoParams;

use crate::shared::pagination::{PageParams, SortOrder, DEFAULT_PAGE_SIZE};

/// Paging and ordering query parameters shared by list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page
    #[serde(default = "default_size")]
    pub size: u64,
    /// Column to order by; unknown columns fall back to `id`
    pub order_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl ListParams {
    pub fn page_params(&self) -> PageParams {
        PageParams::new(self.page, self.size)
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
            order_by: None,
            sort_order: SortOrder::Asc,
        }
    }
}
