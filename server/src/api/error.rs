//! APIエラーレスポンス
//!
//! すべてのエラーは `{"message": "..."}` 形式で返す

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tuckshop_common::error::{AuthError, INTERNAL_ERROR_MESSAGE};

/// APIエラー
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 認証エラー
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// リソースが見つからない
    #[error("{0}")]
    NotFound(String),
}

/// エラーレスポンスJSON
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// メッセージ
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Auth(AuthError::MissingCredentials) => {
                (StatusCode::BAD_REQUEST, AuthError::MissingCredentials.to_string())
            }
            ApiError::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, AuthError::InvalidCredentials.to_string())
            }
            ApiError::Auth(AuthError::Unauthorized(detail)) => (StatusCode::UNAUTHORIZED, detail),
            ApiError::Auth(AuthError::Internal(detail)) => {
                // 内部の詳細はログにのみ出力する
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
