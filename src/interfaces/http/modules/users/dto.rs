//! User request/response DTOs not shared with the domain layer

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::pagination::{PageParams, DEFAULT_PAGE_SIZE};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignRolesRequest {
    #[validate(length(max = 100, message = "at most 100 roles per user"))]
    pub role_ids: Vec<i64>,
}

/// OpenAPI shape of the import upload
#[derive(ToSchema)]
pub struct ImportForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportResult {
    pub imported: u64,
}

/// Which page of users to export
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl From<&ExportParams> for PageParams {
    fn from(params: &ExportParams) -> Self {
        PageParams::new(params.page, params.size)
    }
}
