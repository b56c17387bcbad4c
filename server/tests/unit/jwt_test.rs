//! JWT生成と検証のユニットテスト

use chrono::Duration;
use tuckshop_server::auth::jwt::{create_jwt, verify_jwt, TokenLifetimes};

#[test]
fn test_token_is_signed_with_hs256() {
    let token = create_jwt("user-1", "user", Duration::hours(1), "secret").unwrap();

    let header = jsonwebtoken::decode_header(&token).unwrap();
    assert_eq!(header.alg, jsonwebtoken::Algorithm::HS256);
}

#[test]
fn test_verify_with_wrong_secret_fails() {
    // Given: シークレットAで署名されたトークン
    let token = create_jwt("user-1", "user", Duration::hours(1), "secret-a").unwrap();

    // When/Then: シークレットBでは検証できない
    assert!(verify_jwt(&token, "secret-b").is_err());
}

#[test]
fn test_expired_token_is_rejected() {
    let token = create_jwt("user-1", "user", Duration::hours(-2), "secret").unwrap();
    assert!(verify_jwt(&token, "secret").is_err());
}

#[test]
fn test_tampered_token_is_rejected() {
    let token = create_jwt("user-1", "user", Duration::hours(1), "secret").unwrap();
    let forged = create_jwt("user-1", "admin", Duration::hours(1), "secret").unwrap();

    // 署名はそのままでペイロードだけ差し替える
    let parts: Vec<&str> = token.split('.').collect();
    let forged_parts: Vec<&str> = forged.split('.').collect();
    let tampered = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

    assert!(verify_jwt(&tampered, "secret").is_err());
}

#[test]
fn test_lifetimes_by_role() {
    let lifetimes = TokenLifetimes::default();

    assert_eq!(lifetimes.for_role("admin"), Duration::hours(8));
    assert_eq!(lifetimes.for_role("user"), Duration::hours(24));
    assert_eq!(lifetimes.for_role("cashier"), Duration::hours(24));
}
