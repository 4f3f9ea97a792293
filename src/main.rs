// region:    --- Imports
use crate::database::DatabaseManager;
use crate::identity::IdentityManager;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod auction;
mod bidding;
mod database;
mod error;
mod handlers;
mod identity;
mod query;
mod questions;

// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new().await);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 계정/세션 관리자 생성
    let identity_manager = Arc::new(IdentityManager::new(Arc::clone(&db_manager)));

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        .route("/users", post(handlers::handle_register))
        .route("/users/:user_id", get(handlers::handle_get_user))
        .route("/login", post(handlers::handle_login))
        .route("/logout", post(handlers::handle_logout))
        .route("/items", get(handlers::handle_search))
        .route("/search", get(handlers::handle_search))
        .route("/item", post(handlers::handle_create_item))
        .route("/item/:item_id", get(handlers::handle_get_item))
        .route(
            "/item/:item_id/bid",
            get(handlers::handle_get_bid_history).post(handlers::handle_place_bid),
        )
        .route(
            "/item/:item_id/question",
            get(handlers::handle_get_questions).post(handlers::handle_ask_question),
        )
        .route(
            "/question/:question_id",
            post(handlers::handle_answer_question),
        )
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state((db_manager, identity_manager));

    // 리스너 생성(로컬 호스트의 3000번 포트를 사용)
    let listener = TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr().unwrap()
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
