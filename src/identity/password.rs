/// argon2id 기반 비밀번호 해시/검증 및 비밀번호 정책
use crate::error::{Error, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// 비밀번호 해시 생성 (솔트 포함 PHC 문자열)
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Store(format!("비밀번호 해시 생성 실패: {e}")))
}

/// 저장된 해시와 비밀번호 대조
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| Error::Store(format!("비밀번호 해시 형식 오류: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// 비밀번호 정책 검사: 8~30자, 대문자/소문자/숫자/특수문자 각 1자 이상
pub fn validate_password(password: &str) -> Result<()> {
    let len = password.chars().count();
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| "#?!@$%^&*-".contains(c));

    if !(8..=30).contains(&len) || !has_upper || !has_lower || !has_digit || !has_special {
        return Err(Error::InvalidInput(
            "비밀번호는 8~30자이고 대문자, 소문자, 숫자, 특수문자를 각각 포함해야 합니다."
                .into(),
        ));
    }
    Ok(())
}
