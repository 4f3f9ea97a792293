// region:    --- Imports
use crate::auction::phase::Phase;
use crate::bidding::commands as bid_commands;
use crate::bidding::commands::{CreateItemCommand, PlaceBidCommand};
use crate::database::DatabaseManager;
use crate::error::Error;
use crate::identity::model::{LoginCommand, RegisterCommand};
use crate::identity::{IdentityManager, SessionResolver};
use crate::query;
use crate::questions::commands as question_commands;
use crate::questions::commands::{AnswerQuestionCommand, AskQuestionCommand};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

/// 핸들러 공유 상태
pub type AppState = (Arc<DatabaseManager>, Arc<IdentityManager>);

// region:    --- Error Mapping

/// 도메인 오류를 HTTP 응답으로 변환
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(json!({ "error": self.to_string(), "code": self.code() })),
        )
            .into_response()
    }
}

// endregion: --- Error Mapping

// region:    --- Session Helpers

/// X-Authorization 헤더에서 세션 토큰 추출
fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers.get("X-Authorization").and_then(|v| v.to_str().ok())
}

/// 인증 실패 응답
fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "유효한 세션 토큰이 필요합니다.", "code": "UNAUTHORIZED" })),
    )
        .into_response()
}

/// 세션 토큰을 사용자 식별자로 해석
async fn authenticate(identity: &IdentityManager, headers: &HeaderMap) -> Result<i64, Response> {
    let Some(token) = session_token(headers) else {
        return Err(unauthorized());
    };
    match identity.resolve_session(token).await {
        Ok(Some(user_id)) => Ok(user_id),
        Ok(None) => Err(unauthorized()),
        Err(e) => Err(e.into_response()),
    }
}

// endregion: --- Session Helpers

// region:    --- Identity Handlers

/// 회원 가입 요청 처리
pub async fn handle_register(
    State((_, identity)): State<AppState>,
    Json(cmd): Json<RegisterCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 회원 가입 요청 처리 시작: {}", "Command", cmd.email);
    match identity.register(cmd).await {
        Ok(user_id) => {
            (StatusCode::CREATED, Json(json!({ "user_id": user_id }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// 로그인 요청 처리
pub async fn handle_login(
    State((_, identity)): State<AppState>,
    Json(cmd): Json<LoginCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 로그인 요청 처리 시작: {}", "Command", cmd.email);
    match identity.login(cmd).await {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 로그아웃 요청 처리
pub async fn handle_logout(
    State((_, identity)): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    info!("{:<12} --> 로그아웃 요청 처리 시작", "Command");
    let Some(token) = session_token(&headers) else {
        return unauthorized();
    };
    match identity.resolve_session(token).await {
        Ok(Some(_)) => {}
        Ok(None) => return unauthorized(),
        Err(e) => return e.into_response(),
    }
    match identity.logout(token).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}

/// 사용자 상세 조회
pub async fn handle_get_user(
    State((db_manager, _)): State<AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 사용자 상세 조회 id: {}", "HandlerQuery", user_id);
    match query::handlers::get_user_details(&db_manager, user_id).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- Identity Handlers

// region:    --- Command Handlers

/// 상품 등록 요청 처리
pub async fn handle_create_item(
    State((db_manager, identity)): State<AppState>,
    headers: HeaderMap,
    Json(cmd): Json<CreateItemCommand>,
) -> impl IntoResponse {
    let creator_id = match authenticate(&identity, &headers).await {
        Ok(user_id) => user_id,
        Err(resp) => return resp,
    };
    match bid_commands::handle_create_item(&db_manager, creator_id, cmd).await {
        Ok(item_id) => {
            (StatusCode::CREATED, Json(json!({ "item_id": item_id }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// 입찰 요청 처리
pub async fn handle_place_bid(
    State((db_manager, identity)): State<AppState>,
    Path(item_id): Path<i64>,
    headers: HeaderMap,
    Json(cmd): Json<PlaceBidCommand>,
) -> impl IntoResponse {
    let bidder_id = match authenticate(&identity, &headers).await {
        Ok(user_id) => user_id,
        Err(resp) => return resp,
    };
    match bid_commands::handle_place_bid(&db_manager, item_id, bidder_id, cmd).await {
        Ok(bid_id) => (StatusCode::CREATED, Json(json!({ "bid_id": bid_id }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 질문 등록 요청 처리
pub async fn handle_ask_question(
    State((db_manager, identity)): State<AppState>,
    Path(item_id): Path<i64>,
    headers: HeaderMap,
    Json(cmd): Json<AskQuestionCommand>,
) -> impl IntoResponse {
    let asker_id = match authenticate(&identity, &headers).await {
        Ok(user_id) => user_id,
        Err(resp) => return resp,
    };
    match question_commands::handle_ask_question(&db_manager, item_id, asker_id, cmd).await {
        Ok(question_id) => {
            (StatusCode::OK, Json(json!({ "question_id": question_id }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// 답변 등록 요청 처리
pub async fn handle_answer_question(
    State((db_manager, identity)): State<AppState>,
    Path(question_id): Path<i64>,
    headers: HeaderMap,
    Json(cmd): Json<AnswerQuestionCommand>,
) -> impl IntoResponse {
    let answerer_id = match authenticate(&identity, &headers).await {
        Ok(user_id) => user_id,
        Err(resp) => return resp,
    };
    match question_commands::handle_answer_question(&db_manager, question_id, answerer_id, cmd)
        .await
    {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 검색 질의 파라미터
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub status: Option<Phase>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// 상품 검색
/// 토큰이 없거나 해석되지 않으면 익명 호출자로 검색한다.
pub async fn handle_search(
    State((db_manager, identity)): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 검색: {:?}", "HandlerQuery", params);
    let caller = match session_token(&headers) {
        Some(token) => match identity.resolve_session(token).await {
            Ok(user_id) => user_id,
            Err(e) => return e.into_response(),
        },
        None => None,
    };
    match query::handlers::search_items(
        &db_manager,
        &params.q,
        params.status,
        caller,
        params.limit.unwrap_or(10),
        params.offset.unwrap_or(0),
    )
    .await
    {
        Ok(items) => Json(items).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 상품 상세 조회
pub async fn handle_get_item(
    State((db_manager, _)): State<AppState>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 상세 조회 id: {}", "HandlerQuery", item_id);
    match query::handlers::get_item_details(&db_manager, item_id).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 입찰 이력 조회
pub async fn handle_get_bid_history(
    State((db_manager, _)): State<AppState>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "HandlerQuery", item_id);
    match query::handlers::get_bid_history(&db_manager, item_id).await {
        Ok(history) => Json(history).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 상품 질문 목록 조회
pub async fn handle_get_questions(
    State((db_manager, _)): State<AppState>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 질문 목록 조회 id: {}", "HandlerQuery", item_id);
    match query::handlers::list_questions(&db_manager, item_id).await {
        Ok(questions) => Json(questions).into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- Query Handlers
