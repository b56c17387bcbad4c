//! 認証ミドルウェア

use crate::api::error::ApiError;
use crate::auth::AuthService;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tuckshop_common::error::{AuthError, INVALID_TOKEN_MESSAGE};

/// JWT認証ミドルウェア
///
/// Authorizationヘッダーから "Bearer {token}" を抽出してJWT検証を行う。
/// ロールによるアクセス制御は行わない。
///
/// # Returns
/// * `Ok(Response)` - 認証成功、requestにClaimsを追加
/// * `Err(ApiError)` - 認証失敗、401 Unauthorized
pub async fn jwt_auth_middleware(
    State(auth): State<AuthService>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AuthError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AuthError::Unauthorized("Invalid Authorization header format".to_string())
    })?;

    // 検証失敗の詳細（署名不一致・期限切れなど）はログにのみ出力する
    let claims = auth.verify_token(token).map_err(|e| {
        tracing::warn!("JWT verification failed: {}", e);
        AuthError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
