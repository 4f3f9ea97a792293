/// 질문/답변 커맨드 처리
/// 1. 질문 등록
/// 2. 답변 등록 (1회 한정)
// region:    --- Imports
use crate::auction::policy;
use crate::bidding::model::Item;
use crate::database::DatabaseManager;
use crate::error::{Error, Result};
use crate::query::queries;
use crate::questions::model::QuestionWithCreator;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands

/// 질문 등록 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct AskQuestionCommand {
    pub question_text: String,
}

/// 답변 등록 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerQuestionCommand {
    pub answer_text: String,
}

/// 1. 질문 등록
/// 상품 등록자 본인은 자기 상품에 질문할 수 없다.
pub async fn handle_ask_question(
    db_manager: &DatabaseManager,
    item_id: i64,
    asker_id: i64,
    cmd: AskQuestionCommand,
) -> Result<i64> {
    info!(
        "{:<12} --> 질문 등록 요청 처리 시작: item {} asker {}",
        "Command", item_id, asker_id
    );
    validate_text(&cmd.question_text, "질문")?;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let item = sqlx::query_as::<_, Item>(queries::GET_ITEM)
                    .bind(item_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or_else(|| Error::NotFound("상품을 찾을 수 없습니다.".into()))?;

                if policy::is_owner(item.creator_id, asker_id) {
                    return Err(Error::Forbidden(
                        "자신이 등록한 상품에는 질문할 수 없습니다.".into(),
                    ));
                }

                let question_id = sqlx::query_scalar::<_, i64>(queries::INSERT_QUESTION)
                    .bind(&cmd.question_text)
                    .bind(asker_id)
                    .bind(item_id)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(question_id)
            })
        })
        .await
}

/// 2. 답변 등록
/// 상품 등록자만 답변할 수 있고, 답변은 한 번만 기록된다.
/// 동시 답변이 중복 기록되지 않도록 질문 행을 잠근 뒤 미답변 여부를 확인한다.
pub async fn handle_answer_question(
    db_manager: &DatabaseManager,
    question_id: i64,
    answerer_id: i64,
    cmd: AnswerQuestionCommand,
) -> Result<()> {
    info!(
        "{:<12} --> 답변 등록 요청 처리 시작: question {} answerer {}",
        "Command", question_id, answerer_id
    );
    validate_text(&cmd.answer_text, "답변")?;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let question =
                    sqlx::query_as::<_, QuestionWithCreator>(queries::GET_QUESTION_FOR_UPDATE)
                        .bind(question_id)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or_else(|| Error::NotFound("질문을 찾을 수 없습니다.".into()))?;

                if !policy::is_owner(question.creator_id, answerer_id) {
                    return Err(Error::Forbidden(
                        "상품 등록자만 답변할 수 있습니다.".into(),
                    ));
                }
                if policy::is_answered(question.answer.as_deref()) {
                    return Err(Error::Forbidden(
                        "이미 답변이 등록된 질문입니다.".into(),
                    ));
                }

                sqlx::query(queries::ANSWER_QUESTION)
                    .bind(&cmd.answer_text)
                    .bind(question_id)
                    .execute(&mut **tx)
                    .await?;
                Ok(())
            })
        })
        .await
}

/// 질문/답변 본문 검증
fn validate_text(text: &str, what: &str) -> Result<()> {
    let len = text.chars().count();
    if len == 0 || len > 1000 {
        return Err(Error::InvalidInput(format!(
            "{}은 1자 이상 1000자 이하여야 합니다.",
            what
        )));
    }
    Ok(())
}

// endregion: --- Commands
