/// 상품 등록
pub const INSERT_ITEM: &str = "INSERT INTO items (name, description, starting_bid, start_date, end_date, creator_id) VALUES ($1, $2, $3, $4, $5, $6) RETURNING item_id";

/// 상품 조회
pub const GET_ITEM: &str = "SELECT item_id, name, description, starting_bid, start_date, end_date, creator_id FROM items WHERE item_id = $1";

/// 상품 조회 (행 잠금) — 같은 상품의 입찰 수락 판정 직렬화용
pub const GET_ITEM_FOR_UPDATE: &str = "SELECT item_id, name, description, starting_bid, start_date, end_date, creator_id FROM items WHERE item_id = $1 FOR UPDATE";

/// 최고 입찰가 조회
pub const GET_HIGHEST_BID: &str =
    "SELECT MAX(amount) AS highest_bid FROM bids WHERE item_id = $1";

/// 입찰 기록 추가
pub const INSERT_BID: &str =
    "INSERT INTO bids (item_id, user_id, amount, bid_time) VALUES ($1, $2, $3, $4) RETURNING bid_id";

/// 입찰 이력 조회 (입찰자 이름 포함, 최신순)
pub const GET_BID_HISTORY: &str = r#"
    SELECT b.item_id, b.user_id, u.first_name, u.last_name, b.amount, b.bid_time
    FROM bids b
    JOIN users u ON u.user_id = b.user_id
    WHERE b.item_id = $1
    ORDER BY b.bid_time DESC, b.bid_id DESC
"#;

/// 상품 상세 조회 (현재가, 등록자, 최고 입찰자 포함)
/// 최고 입찰자는 금액 내림차순, 같은 금액이면 먼저 들어온 입찰이 우선한다.
pub const GET_ITEM_DETAILS: &str = r#"
    SELECT
        i.item_id, i.name, i.description, i.starting_bid, i.start_date, i.end_date, i.creator_id,
        COALESCE(b.amount, i.starting_bid) AS current_bid,
        cu.first_name AS first_name,
        cu.last_name AS last_name,
        b.user_id AS current_bid_user_id,
        bu.first_name AS current_bid_first_name,
        bu.last_name AS current_bid_last_name
    FROM items i
    JOIN users cu ON cu.user_id = i.creator_id
    LEFT JOIN LATERAL (
        SELECT user_id, amount
        FROM bids
        WHERE item_id = i.item_id
        ORDER BY amount DESC, bid_time ASC
        LIMIT 1
    ) b ON TRUE
    LEFT JOIN users bu ON bu.user_id = b.user_id
    WHERE i.item_id = $1
"#;

/// 검색 후보 조회 (이름/설명 부분 일치, 호출자 입찰 여부 포함, id 오름차순)
pub const SEARCH_CANDIDATES: &str = r#"
    SELECT
        i.item_id, i.name, i.description, i.end_date, i.creator_id,
        u.first_name, u.last_name,
        EXISTS (
            SELECT 1 FROM bids b WHERE b.item_id = i.item_id AND b.user_id = $2
        ) AS caller_has_bid
    FROM items i
    JOIN users u ON u.user_id = i.creator_id
    WHERE i.name ILIKE $1 OR i.description ILIKE $1
    ORDER BY i.item_id ASC
"#;

/// 질문 등록
pub const INSERT_QUESTION: &str =
    "INSERT INTO questions (question, asked_by, item_id) VALUES ($1, $2, $3) RETURNING question_id";

/// 질문 조회 (행 잠금) — 답변 1회 기록 보장용, 상품 등록자 포함
pub const GET_QUESTION_FOR_UPDATE: &str = r#"
    SELECT q.answer, i.creator_id
    FROM questions q
    JOIN items i ON i.item_id = q.item_id
    WHERE q.question_id = $1
    FOR UPDATE OF q
"#;

/// 답변 기록
pub const ANSWER_QUESTION: &str = "UPDATE questions SET answer = $1 WHERE question_id = $2";

/// 상품 질문 목록 조회 (최신순)
pub const GET_QUESTIONS: &str = r#"
    SELECT question_id, question AS question_text, answer AS answer_text
    FROM questions
    WHERE item_id = $1
    ORDER BY question_id DESC
"#;

/// 사용자 등록
pub const INSERT_USER: &str = "INSERT INTO users (first_name, last_name, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING user_id";

/// 자격 증명 조회 (행 잠금) — 로그인 시 토큰 재사용/발급 직렬화용
pub const GET_CREDENTIALS_FOR_UPDATE: &str =
    "SELECT user_id, password_hash, session_token FROM users WHERE email = $1 FOR UPDATE";

/// 세션 토큰 저장
pub const SET_SESSION_TOKEN: &str = "UPDATE users SET session_token = $1 WHERE user_id = $2";

/// 세션 토큰 폐기
pub const CLEAR_SESSION_TOKEN: &str =
    "UPDATE users SET session_token = NULL WHERE session_token = $1";

/// 세션 토큰으로 사용자 조회
pub const GET_USER_BY_TOKEN: &str = "SELECT user_id FROM users WHERE session_token = $1";

/// 사용자 조회
pub const GET_USER: &str =
    "SELECT user_id, first_name, last_name, email FROM users WHERE user_id = $1";

/// 사용자가 등록한 상품 목록
pub const GET_USER_SELLING: &str = r#"
    SELECT i.item_id, i.name, i.description, i.end_date, i.creator_id, u.first_name, u.last_name
    FROM items i
    JOIN users u ON u.user_id = i.creator_id
    WHERE i.creator_id = $1
    ORDER BY i.item_id ASC
"#;

/// 사용자가 입찰 중인 상품 목록 (상품당 한 행)
pub const GET_USER_BIDDING: &str = r#"
    SELECT DISTINCT i.item_id, i.name, i.description, i.end_date, i.creator_id, u.first_name, u.last_name
    FROM bids b
    JOIN items i ON i.item_id = b.item_id
    JOIN users u ON u.user_id = i.creator_id
    WHERE b.user_id = $1
    ORDER BY i.item_id ASC
"#;
