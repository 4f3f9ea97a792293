/// 사용자 계정 및 세션 관리
/// 나머지 모듈은 세션 토큰을 직접 다루지 않고 SessionResolver로 해석된
/// 사용자 식별자만 전달받는다.
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::{Error, Result};
use crate::query::queries;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
// endregion: --- Imports

pub mod model;
pub mod password;

use self::model::{LoginCommand, LoginSession, RegisterCommand};

// region:    --- Session Resolver

/// 세션 토큰을 사용자 식별자로 해석하는 경계
#[async_trait]
pub trait SessionResolver {
    async fn resolve_session(&self, token: &str) -> Result<Option<i64>>;
}

// endregion: --- Session Resolver

// region:    --- Identity Manager

/// 자격 증명 행 (로그인 검증용)
#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: i64,
    password_hash: String,
    session_token: Option<String>,
}

pub struct IdentityManager {
    db_manager: Arc<DatabaseManager>,
}

impl IdentityManager {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }

    /// 회원 가입
    pub async fn register(&self, cmd: RegisterCommand) -> Result<i64> {
        info!("{:<12} --> 회원 가입 요청: {}", "Identity", cmd.email);
        validate_registration(&cmd)?;
        let password_hash = password::hash_password(&cmd.password)?;

        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let result = sqlx::query_scalar::<_, i64>(queries::INSERT_USER)
                        .bind(&cmd.first_name)
                        .bind(&cmd.last_name)
                        .bind(&cmd.email)
                        .bind(&password_hash)
                        .fetch_one(&mut **tx)
                        .await;
                    match result {
                        Ok(user_id) => Ok(user_id),
                        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                            Error::InvalidInput("이미 등록된 이메일입니다.".into()),
                        ),
                        Err(e) => Err(Error::from(e)),
                    }
                })
            })
            .await
    }

    /// 로그인
    /// 살아 있는 토큰이 있으면 재사용하고, 없으면 새로 발급한다.
    /// 같은 계정의 동시 로그인이 토큰을 중복 발급하지 않도록 사용자 행을 잠근다.
    pub async fn login(&self, cmd: LoginCommand) -> Result<LoginSession> {
        info!("{:<12} --> 로그인 요청: {}", "Identity", cmd.email);

        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let row =
                        sqlx::query_as::<_, CredentialRow>(queries::GET_CREDENTIALS_FOR_UPDATE)
                            .bind(&cmd.email)
                            .fetch_optional(&mut **tx)
                            .await?
                            .ok_or_else(invalid_credentials)?;

                    if !password::verify_password(&cmd.password, &row.password_hash)? {
                        return Err(invalid_credentials());
                    }

                    if let Some(token) = row.session_token {
                        return Ok(LoginSession {
                            user_id: row.user_id,
                            session_token: token,
                        });
                    }

                    let token = Uuid::new_v4().simple().to_string();
                    sqlx::query(queries::SET_SESSION_TOKEN)
                        .bind(&token)
                        .bind(row.user_id)
                        .execute(&mut **tx)
                        .await?;
                    Ok(LoginSession {
                        user_id: row.user_id,
                        session_token: token,
                    })
                })
            })
            .await
    }

    /// 로그아웃 (토큰 폐기)
    pub async fn logout(&self, token: &str) -> Result<()> {
        info!("{:<12} --> 로그아웃 요청", "Identity");
        let token = token.to_owned();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    sqlx::query(queries::CLEAR_SESSION_TOKEN)
                        .bind(&token)
                        .execute(&mut **tx)
                        .await?;
                    Ok(())
                })
            })
            .await
    }
}

#[async_trait]
impl SessionResolver for IdentityManager {
    async fn resolve_session(&self, token: &str) -> Result<Option<i64>> {
        let token = token.to_owned();
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let user_id = sqlx::query_scalar::<_, i64>(queries::GET_USER_BY_TOKEN)
                        .bind(&token)
                        .fetch_optional(&mut **tx)
                        .await?;
                    Ok(user_id)
                })
            })
            .await
    }
}

/// 로그인 실패 사유는 구분하지 않는다
fn invalid_credentials() -> Error {
    Error::InvalidInput("이메일 또는 비밀번호가 올바르지 않습니다.".into())
}

/// 가입 입력 검증
fn validate_registration(cmd: &RegisterCommand) -> Result<()> {
    if cmd.first_name.is_empty() || cmd.last_name.is_empty() {
        return Err(Error::InvalidInput("이름은 비울 수 없습니다.".into()));
    }
    if !is_valid_email(&cmd.email) {
        return Err(Error::InvalidInput(
            "이메일 형식이 올바르지 않습니다.".into(),
        ));
    }
    password::validate_password(&cmd.password)
}

/// 이메일 형식 검사
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

// endregion: --- Identity Manager

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("buyer@example.com"));
        assert!(!is_valid_email("buyer"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("buyer@example"));
        assert!(!is_valid_email("buyer@.com."));
    }

    #[test]
    fn registration_validation() {
        let mut cmd = RegisterCommand {
            first_name: "길동".into(),
            last_name: "홍".into(),
            email: "hong@example.com".into(),
            password: "GoodPass1!".into(),
        };
        assert!(validate_registration(&cmd).is_ok());

        cmd.first_name = String::new();
        assert!(validate_registration(&cmd).is_err());

        cmd.first_name = "길동".into();
        cmd.email = "not-an-email".into();
        assert!(validate_registration(&cmd).is_err());

        cmd.email = "hong@example.com".into();
        cmd.password = "weak".into();
        assert!(validate_registration(&cmd).is_err());
    }
}
