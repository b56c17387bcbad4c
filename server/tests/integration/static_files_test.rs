//! 静的ファイル配信の統合テスト

use crate::support::server::{
    add_user, build_app, create_auth_service, get, post_login, test_policy,
};
use axum::http::StatusCode;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tuckshop_common::error::ServerError;
use tuckshop_server::{
    api,
    auth::bootstrap::ensure_default_admin,
    config::Config,
    db::{initialize_database, UserStore},
    AppState,
};

fn write_bundle(dir: &std::path::Path) {
    fs::write(dir.join("index.html"), "<!DOCTYPE html><title>Tuckshop</title>").unwrap();
    fs::write(dir.join("app.js"), "console.log('tuckshop');").unwrap();
    fs::create_dir_all(dir.join("css")).unwrap();
    fs::write(dir.join("css/site.css"), "body { margin: 0; }").unwrap();
    // /api 配下と同名のファイルがあっても配信されてはならない
    fs::create_dir_all(dir.join("api/auth")).unwrap();
    fs::write(dir.join("api/auth/me"), "leaked").unwrap();
    fs::write(dir.join("api/secret.txt"), "leaked").unwrap();
}

#[tokio::test]
async fn test_root_serves_index() {
    let static_dir = tempfile::tempdir().unwrap();
    write_bundle(static_dir.path());
    let (app, _) = build_app(static_dir.path()).await;

    let (status, body) = get(&app, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"<!DOCTYPE html"));
}

#[tokio::test]
async fn test_assets_served_relative_to_root() {
    let static_dir = tempfile::tempdir().unwrap();
    write_bundle(static_dir.path());
    let (app, _) = build_app(static_dir.path()).await;

    let (status, body) = get(&app, "/app.js", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"console.log('tuckshop');");

    let (status, body) = get(&app, "/css/site.css", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"body { margin: 0; }");
}

#[tokio::test]
async fn test_missing_asset_is_404() {
    let static_dir = tempfile::tempdir().unwrap();
    write_bundle(static_dir.path());
    let (app, _) = build_app(static_dir.path()).await;

    let (status, _) = get(&app, "/missing.js", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_path_traversal_is_not_served() {
    let parent = tempfile::tempdir().unwrap();
    let static_root = parent.path().join("public");
    fs::create_dir_all(&static_root).unwrap();
    write_bundle(&static_root);
    fs::write(parent.path().join("tuckshop.db"), "secret").unwrap();
    let (app, _) = build_app(&static_root).await;

    let (status, body) = get(&app, "/../tuckshop.db", None).await;
    assert_ne!(status, StatusCode::OK);
    assert_ne!(body, b"secret");
}

#[tokio::test]
async fn test_api_paths_are_not_served_from_disk() {
    let static_dir = tempfile::tempdir().unwrap();
    write_bundle(static_dir.path());
    let (app, _) = build_app(static_dir.path()).await;

    // エンコードや空セグメントでServeDir側の正規化後に /api になるものも含む
    let variants = [
        "/api/secret.txt",
        "/api%2Fsecret.txt",
        "/%61pi/secret.txt",
        "//api/secret.txt",
        "/./api/secret.txt",
        "/api%2fauth%2fme",
    ];
    for uri in variants {
        let (status, body) = get(&app, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri: {}", uri);
        assert_ne!(body, b"leaked", "uri: {}", uri);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Not found", "uri: {}", uri);
    }

    // 既存のAPIルートは静的ファイルより優先される
    let (status, _) = get(&app, "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unaffected_by_static_root() {
    let static_dir = tempfile::tempdir().unwrap();
    write_bundle(static_dir.path());
    let (app, auth) = build_app(static_dir.path()).await;
    add_user(auth.store(), "cashier", "pa55word", "user").await;

    let (status, body) = post_login(
        &app,
        json!({"username": "cashier", "password": "pa55word"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_default_layout_does_not_expose_database() {
    let base = tempfile::tempdir().unwrap();
    let config = Config::default();
    assert!(config.validate_layout_in(base.path()).is_ok());

    // 既定構成を作業ディレクトリ相当の一時ディレクトリに再現する
    let db_path = base.path().join(config.database_path().unwrap());
    let url = format!("sqlite://{}", db_path.display());
    let store = UserStore::new(initialize_database(&url).await.unwrap());
    ensure_default_admin(&store, "admin", &test_policy())
        .await
        .unwrap();

    let static_root = base.path().join(&config.static_dir);
    fs::create_dir_all(&static_root).unwrap();
    fs::write(static_root.join("index.html"), "<!DOCTYPE html>").unwrap();

    let app = api::create_router(AppState::new(
        create_auth_service(store),
        static_root,
    ));

    let file_name = db_path.file_name().unwrap().to_string_lossy().into_owned();
    let uris = [
        format!("/{}", file_name),
        format!("/{}-wal", file_name),
        format!("/{}-shm", file_name),
        format!("/../{}", file_name),
        format!("/%2e%2e/{}", file_name),
        format!("/..%2f{}", file_name),
    ];
    for uri in &uris {
        let (status, body) = get(&app, uri, None).await;
        assert_ne!(status, StatusCode::OK, "uri: {}", uri);
        assert!(!body.starts_with(b"SQLite format 3"), "uri: {}", uri);
    }

    let (status, _) = get(&app, "/", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_static_root_containing_database_is_refused() {
    let base = tempfile::tempdir().unwrap();
    let config = Config {
        static_dir: PathBuf::from("."),
        ..Config::default()
    };

    let result = config.validate_layout_in(base.path());
    assert!(matches!(result, Err(ServerError::Config(_))));
}
