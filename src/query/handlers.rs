// region:    --- Imports
use super::queries;
use crate::auction::phase::Phase;
use crate::bidding::model::{BidHolder, BidRecord, Item, ItemDetails, ItemSummary, SearchCandidate};
use crate::database::DatabaseManager;
use crate::error::{Error, Result};
use crate::identity::model::{User, UserDetails};
use crate::questions::model::QuestionEntry;
use chrono::{DateTime, Utc};
use tracing::info;

// endregion: --- Imports

// region:    --- Row Models

/// 상품 상세 플랫 행 — 최고 입찰자 컬럼은 입찰이 없으면 null
#[derive(sqlx::FromRow)]
struct ItemDetailsRow {
    item_id: i64,
    name: String,
    description: String,
    starting_bid: i64,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    creator_id: i64,
    current_bid: i64,
    first_name: String,
    last_name: String,
    current_bid_user_id: Option<i64>,
    current_bid_first_name: Option<String>,
    current_bid_last_name: Option<String>,
}

impl From<ItemDetailsRow> for ItemDetails {
    fn from(row: ItemDetailsRow) -> Self {
        let current_bid_holder = match (
            row.current_bid_user_id,
            row.current_bid_first_name,
            row.current_bid_last_name,
        ) {
            (Some(user_id), Some(first_name), Some(last_name)) => Some(BidHolder {
                user_id,
                first_name,
                last_name,
            }),
            _ => None,
        };
        ItemDetails {
            item_id: row.item_id,
            name: row.name,
            description: row.description,
            starting_bid: row.starting_bid,
            start_date: row.start_date,
            end_date: row.end_date,
            creator_id: row.creator_id,
            current_bid: row.current_bid,
            first_name: row.first_name,
            last_name: row.last_name,
            current_bid_holder,
        }
    }
}

// endregion: --- Row Models

// region:    --- Query Handlers

/// 상품 상세 조회
pub async fn get_item_details(
    db_manager: &DatabaseManager,
    item_id: i64,
) -> Result<ItemDetails> {
    info!("{:<12} --> 상품 상세 조회 id: {}", "Query", item_id);
    let row = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let row = sqlx::query_as::<_, ItemDetailsRow>(queries::GET_ITEM_DETAILS)
                    .bind(item_id)
                    .fetch_optional(&mut **tx)
                    .await?;
                Ok::<_, Error>(row)
            })
        })
        .await?
        .ok_or_else(|| Error::NotFound("상품을 찾을 수 없습니다.".into()))?;
    Ok(row.into())
}

/// 입찰 이력 조회 (최신순)
pub async fn get_bid_history(
    db_manager: &DatabaseManager,
    item_id: i64,
) -> Result<Vec<BidRecord>> {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "Query", item_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(queries::GET_ITEM)
                    .bind(item_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or_else(|| Error::NotFound("상품을 찾을 수 없습니다.".into()))?;

                let bids = sqlx::query_as::<_, BidRecord>(queries::GET_BID_HISTORY)
                    .bind(item_id)
                    .fetch_all(&mut **tx)
                    .await?;
                Ok(bids)
            })
        })
        .await
}

/// 상품 검색
/// 텍스트 일치 후보를 id 오름차순으로 받아 단계 필터를 적용하고
/// 남은 목록에 limit/offset을 적용한다.
pub async fn search_items(
    db_manager: &DatabaseManager,
    query_text: &str,
    phase: Option<Phase>,
    caller: Option<i64>,
    limit: usize,
    offset: usize,
) -> Result<Vec<ItemSummary>> {
    info!(
        "{:<12} --> 상품 검색 q: {:?} phase: {:?} caller: {:?}",
        "Query", query_text, phase, caller
    );

    if let Some(p) = phase {
        if p.requires_identity() && caller.is_none() {
            return Err(Error::InvalidInput(
                "OPEN/BID 검색에는 로그인이 필요합니다.".into(),
            ));
        }
    }

    let pattern = format!("%{}%", query_text);
    let candidates = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let rows = sqlx::query_as::<_, SearchCandidate>(queries::SEARCH_CANDIDATES)
                    .bind(&pattern)
                    .bind(caller)
                    .fetch_all(&mut **tx)
                    .await?;
                Ok::<_, Error>(rows)
            })
        })
        .await?;

    let now = Utc::now();
    let items = candidates
        .into_iter()
        .filter(|c| match phase {
            Some(p) => p.matches(c.creator_id, c.end_date, now, caller, c.caller_has_bid),
            None => true,
        })
        .skip(offset)
        .take(limit)
        .map(ItemSummary::from)
        .collect();
    Ok(items)
}

/// 상품 질문 목록 조회 (최신순)
pub async fn list_questions(
    db_manager: &DatabaseManager,
    item_id: i64,
) -> Result<Vec<QuestionEntry>> {
    info!("{:<12} --> 질문 목록 조회 id: {}", "Query", item_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(queries::GET_ITEM)
                    .bind(item_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or_else(|| Error::NotFound("상품을 찾을 수 없습니다.".into()))?;

                let questions = sqlx::query_as::<_, QuestionEntry>(queries::GET_QUESTIONS)
                    .bind(item_id)
                    .fetch_all(&mut **tx)
                    .await?;
                Ok(questions)
            })
        })
        .await
}

/// 사용자 상세 조회 (등록한 상품, 입찰 중인 상품 포함)
pub async fn get_user_details(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> Result<UserDetails> {
    info!("{:<12} --> 사용자 상세 조회 id: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let user = sqlx::query_as::<_, User>(queries::GET_USER)
                    .bind(user_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or_else(|| Error::NotFound("사용자를 찾을 수 없습니다.".into()))?;

                let selling = sqlx::query_as::<_, ItemSummary>(queries::GET_USER_SELLING)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await?;
                let bidding_on = sqlx::query_as::<_, ItemSummary>(queries::GET_USER_BIDDING)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await?;

                Ok(UserDetails {
                    user_id: user.user_id,
                    first_name: user.first_name,
                    last_name: user.last_name,
                    email: user.email,
                    selling,
                    bidding_on,
                })
            })
        })
        .await
}

// endregion: --- Query Handlers
