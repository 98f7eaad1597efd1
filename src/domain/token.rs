use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Token pair returned by login and refresh. Lifetimes are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Token {
    pub access_token: String,
    pub expired_at: i64,
    pub token_type: String,
    pub refresh_token: String,
    pub re_expired_at: i64,
}

impl Token {
    pub const BEARER: &'static str = "bearer";
}
