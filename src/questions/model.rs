use serde::{Deserialize, Serialize};

/// 질문 행 + 해당 상품 등록자 (답변 권한 판정용)
#[derive(Debug, sqlx::FromRow)]
pub struct QuestionWithCreator {
    pub answer: Option<String>,
    pub creator_id: i64,
}

/// 질문 목록 행 (답변이 없으면 answer_text는 null)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuestionEntry {
    pub question_id: i64,
    pub question_text: String,
    pub answer_text: Option<String>,
}
