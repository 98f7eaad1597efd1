use thiserror::Error;

/// Numeric response codes carried in every API envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    ServiceInternalError,
    AuthFailed,
    ParameterError,
    UsernameExists,
    RoleCodeExists,
    TokenInvalid,
    NotFound,
}

impl ResponseCode {
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::ServiceInternalError => -1,
            Self::AuthFailed => 401,
            Self::ParameterError => 400,
            Self::UsernameExists => 100,
            Self::RoleCodeExists => 101,
            Self::TokenInvalid => 402,
            Self::NotFound => 404,
        }
    }

    pub const fn msg(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::ServiceInternalError => "Service internal error",
            Self::AuthFailed => "Username or password error",
            Self::ParameterError => "Parameter error",
            Self::UsernameExists => "Username already exists",
            Self::RoleCodeExists => "Role code already exists",
            Self::TokenInvalid => "Token invalid or expired",
            Self::NotFound => "Resource not found",
        }
    }
}

/// Business and validation failures, surfaced to the caller as-is.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Parameter error: {0}")]
    Validation(String),

    #[error("Username already exists{}", prefixed_list(.0))]
    UsernameExists(Vec<String>),

    #[error("Role code already exists: {0}")]
    RoleCodeExists(String),

    #[error("Username or password error")]
    AuthFailed,

    #[error("Token invalid or expired: {0}")]
    Unauthorized(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    pub const fn code(&self) -> ResponseCode {
        match self {
            Self::NotFound { .. } => ResponseCode::NotFound,
            Self::Validation(_) => ResponseCode::ParameterError,
            Self::UsernameExists(_) => ResponseCode::UsernameExists,
            Self::RoleCodeExists(_) => ResponseCode::RoleCodeExists,
            Self::AuthFailed => ResponseCode::AuthFailed,
            Self::Unauthorized(_) => ResponseCode::TokenInvalid,
        }
    }
}

fn prefixed_list(items: &[String]) -> String {
    items.iter().map(|item| format!(",{item}")).collect()
}

/// Infrastructure failures; never retried, reported as internal errors.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Excel error: {0}")]
    Excel(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Infra(InfraError::Database(err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_exists_lists_every_collision() {
        let err = DomainError::UsernameExists(vec!["alice".into(), "bob".into()]);
        assert_eq!(err.to_string(), "Username already exists,alice,bob");
        assert_eq!(err.code().code(), 100);
    }

    #[test]
    fn db_errors_are_infrastructure() {
        let err: AppError = sea_orm::DbErr::Custom("boom".into()).into();
        assert!(matches!(err, AppError::Infra(InfraError::Database(_))));
    }
}
