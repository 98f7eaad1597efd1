use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Partial update: only provided fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserUpdateCmd {
    #[validate(length(max = 32, message = "nickname must be at most 32 characters"))]
    pub nickname: Option<String>,
    #[validate(length(min = 6, max = 64, message = "password must be 6-64 characters"))]
    pub password: Option<String>,
}
