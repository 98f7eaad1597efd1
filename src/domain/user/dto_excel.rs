use std::collections::HashMap;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::shared::errors::DomainError;

use super::UserQuery;

/// One row of the user import sheet (`username | password | nickname`).
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UserImport {
    #[validate(length(min = 1, max = 32, message = "username must be 1-32 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 64, message = "password must be 6-64 characters"))]
    pub password: String,
    #[validate(length(max = 32, message = "nickname must be at most 32 characters"))]
    pub nickname: Option<String>,
}

impl UserImport {
    /// Build a row from a header-keyed sheet record. `line` is the 1-based
    /// sheet row, used in error messages.
    pub fn from_record(record: &HashMap<String, String>, line: usize) -> Result<Self, DomainError> {
        let field = |name: &str| {
            record
                .get(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let row = Self {
            username: field("username").ok_or_else(|| {
                DomainError::Validation(format!("row {line}: username is required"))
            })?,
            password: field("password").ok_or_else(|| {
                DomainError::Validation(format!("row {line}: password is required"))
            })?,
            nickname: field("nickname"),
        };

        row.validate()
            .map_err(|e| DomainError::Validation(format!("row {line}: {e}")))?;
        Ok(row)
    }
}

/// One row of the user export sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserExport {
    pub id: i64,
    pub username: String,
    pub nickname: Option<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl From<UserQuery> for UserExport {
    fn from(user: UserQuery) -> Self {
        Self {
            id: user.id,
            username: user.username,
            nickname: user.nickname,
            create_time: user.create_time,
            update_time: user.update_time,
        }
    }
}
