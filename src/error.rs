//! API error taxonomy / API错误类型
//!
//! Every failure the query surface can report, with the `{error, message}`
//! JSON body and status code each one maps to.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced to API callers / 返回给调用方的错误
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// page < 1 or not an integer / 页码非法
    #[error("page must be >= 1")]
    InvalidPage,

    /// size outside [1, 100] or not an integer / 每页数量非法
    /// `field` is the parameter name the endpoint uses (`size` or `pageSize`).
    #[error("{field} must be between 1 and 100")]
    InvalidSize { field: &'static str },

    /// A filter parameter could not be coerced / 筛选参数无法解析
    #[error("{0}")]
    InvalidFilterValue(String),

    /// Scoped listing matched nothing / 指定车辆没有任何VIN
    #[error("No VIN instances found for vehicle ID: {0}")]
    NotFound(String),

    /// Search backend or transport failure / 后端查询失败
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPage
            | ApiError::InvalidSize { .. }
            | ApiError::InvalidFilterValue(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short error label for the response body / 响应体中的错误标签
    fn label(&self) -> String {
        match self {
            ApiError::InvalidPage => "Invalid page parameter".to_string(),
            ApiError::InvalidSize { field } => format!("Invalid {} parameter", field),
            ApiError::InvalidFilterValue(_) => "Invalid filter value".to_string(),
            ApiError::NotFound(_) => "No VINs found".to_string(),
            ApiError::Upstream(_) => "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream(ref cause) = self {
            // 后端失败只在这里记录一次
            tracing::error!("search backend failure: {:#}", cause);
        }

        let body = json!({
            "error": self.label(),
            "message": self.to_string(),
        });

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::InvalidPage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidSize { field: "pageSize" }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("nhtsa-ford-mustang-1967".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Upstream(anyhow::anyhow!("connection refused")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_follow_contract() {
        assert_eq!(ApiError::InvalidPage.to_string(), "page must be >= 1");
        assert_eq!(
            ApiError::InvalidSize { field: "size" }.to_string(),
            "size must be between 1 and 100"
        );
        assert_eq!(
            ApiError::InvalidSize { field: "pageSize" }.label(),
            "Invalid pageSize parameter"
        );
        assert_eq!(
            ApiError::NotFound("veh-1".into()).to_string(),
            "No VIN instances found for vehicle ID: veh-1"
        );
    }
}
