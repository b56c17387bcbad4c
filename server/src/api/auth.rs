//! 認証API
//!
//! ログイン、ログアウト、認証情報確認

use crate::api::error::ApiError;
use crate::auth::LoginRequest;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;
use tuckshop_common::auth::Claims;
use tuckshop_common::error::AuthError;

/// ログインレスポンス
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// JWTトークン
    pub token: String,
}

/// 認証情報レスポンス
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// ユーザーID
    pub id: String,
    /// ユーザー名
    pub username: String,
    /// トークンに埋め込まれたロール
    pub role: String,
}

/// POST /api/auth/login - ログイン
///
/// ユーザー名とパスワードで認証し、JWTトークンを発行
///
/// # Returns
/// * `200 OK` - ログイン成功（`{"token": ...}`）
/// * `400 Bad Request` - ユーザー名またはパスワードが欠落・空（JSONとして不正な場合も含む）
/// * `401 Unauthorized` - 認証失敗
/// * `500 Internal Server Error` - サーバーエラー
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Rejected login payload: {}", rejection);
        AuthError::MissingCredentials
    })?;

    let token = state.auth.login(&request).await?;

    Ok(Json(LoginResponse { token }))
}

/// POST /api/auth/logout - ログアウト
///
/// JWTはステートレスなのでクライアント側でトークンを破棄するだけ
///
/// # Returns
/// * `204 No Content` - ログアウト成功
pub async fn logout() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// GET /api/auth/me - 認証情報確認
///
/// # Returns
/// * `200 OK` - ユーザー情報
/// * `401 Unauthorized` - トークンが無効（ミドルウェアで拒否）
/// * `404 Not Found` - トークンのユーザーが存在しない
pub async fn me(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, ApiError> {
    let user_id = claims
        .sub
        .parse::<uuid::Uuid>()
        .map_err(|_| AuthError::Unauthorized("Invalid token subject".to_string()))?;

    let user = state
        .auth
        .store()
        .find_by_id(user_id)
        .await
        .map_err(AuthError::from)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(MeResponse {
        id: user.id.to_string(),
        username: user.username,
        role: claims.role,
    }))
}
