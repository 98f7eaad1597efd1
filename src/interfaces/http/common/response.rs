use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::errors::ResponseCode;

/// Envelope for every JSON response: `{"code": 0, "msg": "Success", "data": ...}`.
///
/// `code` is 0 on success and a [`ResponseCode`] value otherwise; `data` is
/// omitted when there is nothing to return.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: ResponseCode::Success.code(),
            msg: ResponseCode::Success.msg().to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// Data-less response with an explicit code and message.
    pub fn message(code: i32, msg: impl Into<String>) -> Self {
        Self::error(code, msg)
    }

    pub fn from_code(code: ResponseCode) -> Self {
        Self::error(code.code(), code.msg())
    }
}

/// Number of rows touched by a write.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AffectedRows {
    pub affected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_is_omitted() {
        let body = serde_json::to_value(ApiResponse::message(0, "hi")).unwrap();
        assert_eq!(body, serde_json::json!({"code": 0, "msg": "hi"}));

        let body = serde_json::to_value(ApiResponse::success(AffectedRows { affected: 2 })).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"code": 0, "msg": "Success", "data": {"affected": 2}})
        );
    }
}
