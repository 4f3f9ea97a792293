/// 상품 등록 및 입찰 커맨드 처리
/// 1. 상품 등록
/// 2. 입찰
// region:    --- Imports
use crate::auction::policy;
use crate::bidding::model::Item;
use crate::database::DatabaseManager;
use crate::error::{Error, Result};
use crate::query::queries;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands

/// 상품 등록 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateItemCommand {
    pub name: String,
    pub description: String,
    pub starting_bid: i64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
}

/// 입찰 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceBidCommand {
    pub amount: i64,
}

/// 1. 상품 등록
/// 생략된 시작 시각은 현재 시각으로 채운다.
pub async fn handle_create_item(
    db_manager: &DatabaseManager,
    creator_id: i64,
    cmd: CreateItemCommand,
) -> Result<i64> {
    info!(
        "{:<12} --> 상품 등록 요청 처리 시작: {} (creator: {})",
        "Command", cmd.name, creator_id
    );

    let start_date = cmd.start_date.unwrap_or_else(Utc::now);
    validate_new_item(&cmd, start_date)?;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let item_id = sqlx::query_scalar::<_, i64>(queries::INSERT_ITEM)
                    .bind(&cmd.name)
                    .bind(&cmd.description)
                    .bind(cmd.starting_bid)
                    .bind(start_date)
                    .bind(cmd.end_date)
                    .bind(creator_id)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(item_id)
            })
        })
        .await
}

/// 2. 입찰
/// 같은 상품에 대한 수락 판정이 겹치지 않도록 상품 행을 잠근 트랜잭션 안에서
/// 최고가 조회와 기록 추가를 수행한다. 서로 다른 상품의 입찰은 병렬로 진행된다.
pub async fn handle_place_bid(
    db_manager: &DatabaseManager,
    item_id: i64,
    bidder_id: i64,
    cmd: PlaceBidCommand,
) -> Result<i64> {
    info!(
        "{:<12} --> 입찰 요청 처리 시작: item {} bidder {} amount {}",
        "Command", item_id, bidder_id, cmd.amount
    );

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let item = sqlx::query_as::<_, Item>(queries::GET_ITEM_FOR_UPDATE)
                    .bind(item_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or_else(|| Error::NotFound("상품을 찾을 수 없습니다.".into()))?;

                let highest = sqlx::query_scalar::<_, Option<i64>>(queries::GET_HIGHEST_BID)
                    .bind(item_id)
                    .fetch_one(&mut **tx)
                    .await?;
                let current_highest = highest.unwrap_or(item.starting_bid);

                evaluate_bid(item.creator_id, bidder_id, current_highest, cmd.amount)?;

                let bid_id = sqlx::query_scalar::<_, i64>(queries::INSERT_BID)
                    .bind(item_id)
                    .bind(bidder_id)
                    .bind(cmd.amount)
                    .bind(Utc::now())
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(bid_id)
            })
        })
        .await
}

/// 입찰 수락 판정
/// 현재 최고가(입찰이 없으면 시작가)를 엄격히 초과해야 하며, 시작가와 같은
/// 금액의 첫 입찰도 거절된다.
pub fn evaluate_bid(
    creator_id: i64,
    bidder_id: i64,
    current_highest: i64,
    amount: i64,
) -> Result<()> {
    if policy::is_owner(creator_id, bidder_id) {
        return Err(Error::Forbidden(
            "자신이 등록한 상품에는 입찰할 수 없습니다.".into(),
        ));
    }
    if amount <= current_highest {
        return Err(Error::InvalidInput(format!(
            "입찰 금액은 현재 최고가 {}보다 높아야 합니다.",
            current_highest
        )));
    }
    Ok(())
}

/// 상품 등록 입력 검증
fn validate_new_item(cmd: &CreateItemCommand, start_date: DateTime<Utc>) -> Result<()> {
    let name_len = cmd.name.chars().count();
    if name_len == 0 || name_len > 255 {
        return Err(Error::InvalidInput(
            "상품명은 1자 이상 255자 이하여야 합니다.".into(),
        ));
    }
    let description_len = cmd.description.chars().count();
    if description_len == 0 || description_len > 2000 {
        return Err(Error::InvalidInput(
            "상품 설명은 1자 이상 2000자 이하여야 합니다.".into(),
        ));
    }
    if cmd.starting_bid < 0 {
        return Err(Error::InvalidInput("시작가는 0 이상이어야 합니다.".into()));
    }
    if cmd.end_date <= start_date {
        return Err(Error::InvalidInput(
            "종료 시각은 시작 시각 이후여야 합니다.".into(),
        ));
    }
    Ok(())
}

// endregion: --- Commands

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_item_cmd() -> CreateItemCommand {
        CreateItemCommand {
            name: "의자".to_string(),
            description: "원목 의자입니다.".to_string(),
            starting_bid: 10,
            start_date: None,
            end_date: Utc::now() + Duration::hours(1),
        }
    }

    #[test]
    fn first_bid_must_strictly_exceed_starting_bid() {
        // 시작가 10: 10은 거절, 15는 수락
        assert!(matches!(
            evaluate_bid(1, 2, 10, 10),
            Err(Error::InvalidInput(_))
        ));
        assert!(evaluate_bid(1, 2, 10, 15).is_ok());
    }

    #[test]
    fn bid_must_exceed_current_highest() {
        // 최고가 15: 같은 금액은 거절, 20은 수락
        assert!(matches!(
            evaluate_bid(1, 2, 15, 15),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            evaluate_bid(1, 2, 15, 14),
            Err(Error::InvalidInput(_))
        ));
        assert!(evaluate_bid(1, 2, 15, 20).is_ok());
    }

    #[test]
    fn creator_cannot_bid_on_own_item() {
        assert!(matches!(
            evaluate_bid(7, 7, 10, 100),
            Err(Error::Forbidden(_))
        ));
    }

    #[test]
    fn item_validation_bounds() {
        let now = Utc::now();

        let mut cmd = new_item_cmd();
        cmd.name = String::new();
        assert!(validate_new_item(&cmd, now).is_err());

        let mut cmd = new_item_cmd();
        cmd.name = "가".repeat(256);
        assert!(validate_new_item(&cmd, now).is_err());

        let mut cmd = new_item_cmd();
        cmd.description = "가".repeat(2001);
        assert!(validate_new_item(&cmd, now).is_err());

        let mut cmd = new_item_cmd();
        cmd.starting_bid = -1;
        assert!(validate_new_item(&cmd, now).is_err());

        let mut cmd = new_item_cmd();
        cmd.end_date = now - Duration::seconds(1);
        assert!(validate_new_item(&cmd, now).is_err());

        assert!(validate_new_item(&new_item_cmd(), now).is_ok());
    }
}
