//! REST APIハンドラー
//!
//! 認証API（/api/auth/*）とフロントエンド静的ファイル配信

/// 認証API
pub mod auth;
/// APIエラーレスポンス
pub mod error;

use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use error::ApiError;
use tower::ServiceExt;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    // JWT認証が必要なルート
    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .merge(protected_routes)
        .fallback(serve_frontend)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 静的ファイル配信（`/` は index.html）
///
/// `/api` 配下は静的ルートに委譲せず、JSONの404を返す
async fn serve_frontend(State(state): State<AppState>, request: Request) -> Response {
    if is_api_path(request.uri().path()) {
        return ApiError::NotFound("Not found".to_string()).into_response();
    }

    let serve_dir = ServeDir::new(state.static_dir.as_path()).append_index_html_on_directories(true);
    match serve_dir.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// 正規化後の最初のパスセグメントが `api` かどうか
///
/// ServeDir はパーセントデコードと空セグメントの除去を行ってからディスクを参照するため、
/// 同じ正規化を施してから判定する。デコードできないパスはServeDirも配信しない。
fn is_api_path(path: &str) -> bool {
    let Ok(decoded) = urlencoding::decode(path) else {
        return true;
    };
    decoded
        .split(['/', '\\'])
        .find(|segment| !segment.is_empty() && *segment != ".")
        .is_some_and(|first| first.eq_ignore_ascii_case("api"))
}
