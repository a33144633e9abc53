//! 에러 코드 레지스트리
//!
//! 클라이언트에게 그대로 노출되는 에러를 `(HTTP 상태, 업무 코드, 메시지)` 세 값으로
//! 표현합니다. 레지스트리에 등록된 값은 불변이며, 메시지만 바꾼 복제본은
//! [`Errno::with_message`]로 만듭니다.
//!
//! ## 레지스트리
//!
//! | 이름 | HTTP | 코드 |
//! |------|------|------|
//! | [`OK`] | 200 | `""` |
//! | [`INTERNAL_SERVER_ERROR`] | 500 | `InternalError` |
//! | [`ERR_PAGE_NOT_FOUND`] | 404 | `ResourceNotFound.PageNotFound` |
//! | [`ERR_BIND`] | 400 | `InvalidParameter.BindError` |
//! | [`ERR_INVALID_PARAMETER`] | 400 | `InvalidParameter` |
//! | [`ERR_USER_ALREADY_EXIST`] | 400 | `FailedOperation.UserAlreadyExist` |
//!
//! # Examples
//!
//! ```rust
//! use miniblog::core::errno::{decode, ERR_INVALID_PARAMETER};
//!
//! let err = ERR_INVALID_PARAMETER.with_message("username: length");
//! let (status, code, message) = decode(Some(&err));
//!
//! assert_eq!(status.as_u16(), 400);
//! assert_eq!(code, "InvalidParameter");
//! assert_eq!(message, "username: length");
//! ```

use std::borrow::Cow;
use std::error::Error as StdError;

use actix_web::http::StatusCode;
use thiserror::Error;

use crate::core::errors::AppError;

/// 클라이언트에게 노출 가능한 에러 값
///
/// `Display`는 메시지만 출력합니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Errno {
    http: StatusCode,
    code: Cow<'static, str>,
    message: Cow<'static, str>,
}

impl Errno {
    const fn new(http: StatusCode, code: &'static str, message: &'static str) -> Self {
        Self {
            http,
            code: Cow::Borrowed(code),
            message: Cow::Borrowed(message),
        }
    }

    /// HTTP 상태 코드
    pub fn http(&self) -> StatusCode {
        self.http
    }

    /// 기계가 읽는 업무 에러 코드
    pub fn code(&self) -> &str {
        &self.code
    }

    /// 사용자에게 보여줄 메시지
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 상태 코드와 업무 코드는 유지한 채 메시지만 바꾼 복제본을 반환합니다.
    ///
    /// 레지스트리 값 자체는 바뀌지 않습니다. 검증 라이브러리의 상세 설명을
    /// 붙일 때 사용합니다.
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Self {
            http: self.http,
            code: self.code.clone(),
            message: Cow::Owned(message.into()),
        }
    }
}

/// 요청 성공
pub static OK: Errno = Errno::new(StatusCode::OK, "", "");

/// 분류되지 않은 모든 서버 측 에러
pub static INTERNAL_SERVER_ERROR: Errno = Errno::new(
    StatusCode::INTERNAL_SERVER_ERROR,
    "InternalError",
    "Internal server error.",
);

/// 등록되지 않은 경로
pub static ERR_PAGE_NOT_FOUND: Errno = Errno::new(
    StatusCode::NOT_FOUND,
    "ResourceNotFound.PageNotFound",
    "Page not found.",
);

/// 요청 본문을 구조체로 바인딩하지 못함
pub static ERR_BIND: Errno = Errno::new(
    StatusCode::BAD_REQUEST,
    "InvalidParameter.BindError",
    "Error occurred while binding the request body to the struct.",
);

/// 필드 검증 실패
pub static ERR_INVALID_PARAMETER: Errno = Errno::new(
    StatusCode::BAD_REQUEST,
    "InvalidParameter",
    "Parameter verification failed.",
);

/// 이미 존재하는 사용자명
pub static ERR_USER_ALREADY_EXIST: Errno = Errno::new(
    StatusCode::BAD_REQUEST,
    "FailedOperation.UserAlreadyExist",
    "User already exist.",
);

/// 임의의 에러를 `(HTTP 상태, 코드, 메시지)`로 해석합니다.
///
/// - `None` → [`OK`]
/// - [`Errno`] 또는 [`AppError::Errno`] → 해당 값 그대로
/// - 그 외 → [`INTERNAL_SERVER_ERROR`] (원본 에러 문자열은 노출하지 않음)
pub fn decode<'a>(err: Option<&'a (dyn StdError + 'static)>) -> (StatusCode, &'a str, &'a str) {
    let errno = match err {
        None => &OK,
        Some(err) => lookup(err).unwrap_or(&INTERNAL_SERVER_ERROR),
    };

    (errno.http, errno.code(), errno.message())
}

fn lookup<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Errno> {
    if let Some(errno) = err.downcast_ref::<Errno>() {
        return Some(errno);
    }

    match err.downcast_ref::<AppError>() {
        Some(AppError::Errno(errno)) => Some(errno),
        _ => None,
    }
}
