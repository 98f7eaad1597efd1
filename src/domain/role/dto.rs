use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RoleCreateCmd {
    #[validate(length(min = 1, max = 32, message = "role_name must be 1-32 characters"))]
    pub role_name: String,
    #[validate(length(min = 1, max = 32, message = "role_code must be 1-32 characters"))]
    pub role_code: String,
    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: Option<String>,
}

/// Partial update; `role_code` is immutable once created.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RoleUpdateCmd {
    #[validate(length(min = 1, max = 32, message = "role_name must be 1-32 characters"))]
    pub role_name: Option<String>,
    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleQuery {
    pub id: i64,
    pub role_name: String,
    pub role_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}
