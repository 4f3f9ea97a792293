use chrono::{DateTime, Utc};
use serde::Deserialize;

// region:    --- Auction Phase

/// 검색용 경매 단계 분류
/// 저장되는 상태가 아니라 종료 시각과 호출자 기준으로 매번 유도된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    Open,
    Bid,
    Archive,
}

impl Phase {
    /// 호출자 식별이 필요한 단계 필터인지 여부
    pub fn requires_identity(self) -> bool {
        matches!(self, Phase::Open | Phase::Bid)
    }

    /// 단계 필터 일치 여부 판정
    /// (생성자, 종료 시각, 현재 시각, 호출자, 호출자 입찰 여부)의 순수 함수
    pub fn matches(
        self,
        creator_id: i64,
        end_date: DateTime<Utc>,
        now: DateTime<Utc>,
        caller: Option<i64>,
        caller_has_bid: bool,
    ) -> bool {
        match self {
            Phase::Open => caller == Some(creator_id) && end_date > now,
            Phase::Bid => caller_has_bid,
            Phase::Archive => end_date < now,
        }
    }
}

// endregion: --- Auction Phase

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn open_requires_creator_and_future_end() {
        let now = Utc::now();
        let future = now + Duration::hours(1);
        let past = now - Duration::hours(1);

        assert!(Phase::Open.matches(7, future, now, Some(7), false));
        // 다른 사용자의 상품은 OPEN에 잡히지 않는다
        assert!(!Phase::Open.matches(7, future, now, Some(8), false));
        // 종료된 상품도 마찬가지
        assert!(!Phase::Open.matches(7, past, now, Some(7), false));
        assert!(!Phase::Open.matches(7, future, now, None, false));
    }

    #[test]
    fn bid_matches_regardless_of_end_date() {
        let now = Utc::now();
        let past = now - Duration::hours(1);
        let future = now + Duration::hours(1);

        assert!(Phase::Bid.matches(7, past, now, Some(8), true));
        assert!(Phase::Bid.matches(7, future, now, Some(8), true));
        assert!(!Phase::Bid.matches(7, future, now, Some(8), false));
    }

    #[test]
    fn archive_matches_past_end_only() {
        let now = Utc::now();

        assert!(Phase::Archive.matches(7, now - Duration::seconds(1), now, None, false));
        assert!(!Phase::Archive.matches(7, now + Duration::seconds(1), now, None, false));
    }

    #[test]
    fn personalized_phases_require_identity() {
        assert!(Phase::Open.requires_identity());
        assert!(Phase::Bid.requires_identity());
        assert!(!Phase::Archive.requires_identity());
    }
}
