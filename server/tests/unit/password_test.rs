//! パスワードハッシュ化と検証のユニットテスト

use crate::support::server::test_policy;
use tuckshop_server::auth::password::{hash_password, verify_password, PasswordPolicy};

#[test]
fn test_hash_password_creates_argon2id_hash() {
    // Given: 平文パスワード
    let password = "secure_password123";

    // When: パスワードをハッシュ化
    let hash = hash_password(password, &test_policy()).expect("Failed to hash password");

    // Then: PHC形式のArgon2idハッシュで、コストパラメータが埋め込まれている
    assert!(hash.starts_with("$argon2id$"));
    assert!(hash.contains("m=8,t=1,p=1"));
    assert!(!hash.contains(password));
}

#[test]
fn test_hash_password_produces_different_hashes() {
    // Given: 同じパスワード
    let password = "same_password";

    // When: 2回ハッシュ化
    let hash1 = hash_password(password, &test_policy()).expect("Failed to hash password");
    let hash2 = hash_password(password, &test_policy()).expect("Failed to hash password");

    // Then: ソルトのため、異なるハッシュが生成される
    assert_ne!(hash1, hash2);
}

#[test]
fn test_verify_password_with_correct_and_incorrect_password() {
    let hash = hash_password("correct_password", &test_policy()).unwrap();

    assert!(verify_password("correct_password", &hash).unwrap());
    assert!(!verify_password("wrong_password", &hash).unwrap());
    assert!(!verify_password("", &hash).unwrap());
}

#[test]
fn test_verify_uses_parameters_from_hash() {
    // Given: 異なるコストで作成されたハッシュ
    let stronger = PasswordPolicy {
        memory_kib: 16,
        iterations: 2,
        parallelism: 1,
    };
    let hash = hash_password("rotate-me", &stronger).unwrap();

    // Then: 現在のポリシーと関係なく検証できる
    assert!(verify_password("rotate-me", &hash).unwrap());
}

#[test]
fn test_verify_legacy_bcrypt_hash() {
    // Given: 旧デプロイメントのbcryptハッシュ
    let hash = bcrypt::hash("legacy_password", 4).unwrap();

    assert!(verify_password("legacy_password", &hash).unwrap());
    assert!(!verify_password("other_password", &hash).unwrap());
}

#[test]
fn test_verify_password_with_malformed_hash() {
    let result = verify_password("password", "plaintext-not-a-hash");
    assert!(result.is_err());
}

#[test]
fn test_invalid_policy_is_rejected() {
    let policy = PasswordPolicy {
        memory_kib: 1,
        iterations: 0,
        parallelism: 0,
    };
    assert!(policy.validate().is_err());
    assert!(hash_password("password", &policy).is_err());
}
