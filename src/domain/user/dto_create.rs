use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserCreateCmd {
    #[validate(length(min = 1, max = 32, message = "username must be 1-32 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 64, message = "password must be 6-64 characters"))]
    pub password: String,
    #[validate(length(max = 32, message = "nickname must be at most 32 characters"))]
    pub nickname: Option<String>,
}

/// A user row ready to persist; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub nickname: Option<String>,
}
