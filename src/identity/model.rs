use crate::bidding::model::ItemSummary;
use serde::{Deserialize, Serialize};

// 사용자 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// 사용자 프로필 응답 (등록한 상품, 입찰 중인 상품 포함)
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDetails {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub selling: Vec<ItemSummary>,
    pub bidding_on: Vec<ItemSummary>,
}

/// 회원 가입 명령
#[derive(Deserialize)]
pub struct RegisterCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// 로그인 명령
#[derive(Deserialize)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// 로그인 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginSession {
    pub user_id: i64,
    pub session_token: String,
}
