//! # 애플리케이션 에러
//!
//! 요청 처리 경로 전체(핸들러 → 서비스 → 저장소)에서 사용하는 에러 타입입니다.
//! 클라이언트가 봐도 되는 에러는 [`Errno`]로, 그 밖의 실패는 내부 정보를 담은
//! 불투명한 변형으로 표현합니다.
//!
//! ## HTTP 응답 매핑
//!
//! `AppError`는 `actix_web::ResponseError`를 구현하므로 핸들러에서 `?`로
//! 그대로 반환할 수 있습니다. 응답 본문은 항상 [`write_response`]가 만듭니다.
//!
//! | AppError | 응답 |
//! |----------|------|
//! | `Errno(e)` | `e`의 상태 코드, `{code, message}` |
//! | `Storage(_)` | 500 `InternalError` |
//! | `InternalError(_)` | 500 `InternalError` |
//!
//! 불투명한 변형의 상세 메시지는 로그에만 남고 클라이언트에게는 전달되지 않습니다.
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//! use crate::core::errno::ERR_BIND;
//!
//! async fn handler(payload: Result<web::Json<Req>, actix_web::Error>) -> AppResult<HttpResponse> {
//!     let request = payload.map_err(|_| AppError::from(ERR_BIND.clone()))?;
//!     // ...
//! }
//! ```

use std::error::Error as StdError;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::core::errno::{decode, Errno};
use crate::core::response::write_response;
use crate::repositories::StoreError;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 레지스트리에 등록된, 클라이언트에게 노출 가능한 에러
    #[error(transparent)]
    Errno(#[from] Errno),

    /// 저장소 계층에서 올라온, 별도로 분류되지 않은 실패 (500)
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// 예상하지 못한 내부 오류 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        decode(Some(self as &(dyn StdError + 'static))).0
    }

    fn error_response(&self) -> HttpResponse {
        write_response::<()>(Some(self), None)
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 [`AppError::InternalError`]로 변환하는 확장 trait
///
/// ```rust,ignore
/// let hashed = bcrypt::hash(&password, cost).context("비밀번호 해싱 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
