use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 도메인 오류 분류
/// 전송 계층(HTTP 상태 코드)으로의 변환은 handlers에서만 이루어진다.
#[derive(Debug, Error)]
pub enum Error {
    /// 참조한 리소스가 존재하지 않음
    #[error("{0}")]
    NotFound(String),

    /// 권한 규칙 위반 (본인 상품 입찰/질문, 중복 답변 등)
    #[error("{0}")]
    Forbidden(String),

    /// 입력 값 오류 (검증 실패, 낮은 입찰가 등)
    #[error("{0}")]
    InvalidInput(String),

    /// 저장소 또는 내부 구성요소의 일시 장애
    #[error("내부 오류: {0}")]
    Store(String),
}

impl Error {
    /// 응답에 실리는 기계 판독용 오류 코드
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NOT_FOUND",
            Error::Forbidden(_) => "FORBIDDEN",
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::Store(_) => "STORE_FAILURE",
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Store(err.to_string())
    }
}
