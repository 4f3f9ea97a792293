use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 상품 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub item_id: i64,
    pub name: String,
    pub description: String,
    pub starting_bid: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub creator_id: i64,
}

/// 입찰 이력 행 (입찰자 이름 포함)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct BidRecord {
    pub item_id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub amount: i64,
    pub bid_time: DateTime<Utc>,
}

/// 현재 최고 입찰자 정보
#[derive(Debug, Serialize, Deserialize)]
pub struct BidHolder {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// 상품 상세 응답 모델
/// first_name/last_name은 등록자, current_bid_holder는 최고 입찰자(입찰이 없으면 null)
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemDetails {
    pub item_id: i64,
    pub name: String,
    pub description: String,
    pub starting_bid: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub creator_id: i64,
    pub current_bid: i64,
    pub first_name: String,
    pub last_name: String,
    pub current_bid_holder: Option<BidHolder>,
}

/// 검색 및 사용자 프로필 요약 행
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ItemSummary {
    pub item_id: i64,
    pub name: String,
    pub description: String,
    pub end_date: DateTime<Utc>,
    pub creator_id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// 검색 후보 행 — 단계 분류에 필요한 호출자 입찰 여부 플래그를 함께 싣는다
#[derive(Debug, sqlx::FromRow)]
pub struct SearchCandidate {
    pub item_id: i64,
    pub name: String,
    pub description: String,
    pub end_date: DateTime<Utc>,
    pub creator_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub caller_has_bid: bool,
}

impl From<SearchCandidate> for ItemSummary {
    fn from(row: SearchCandidate) -> Self {
        ItemSummary {
            item_id: row.item_id,
            name: row.name,
            description: row.description,
            end_date: row.end_date,
            creator_id: row.creator_id,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}
