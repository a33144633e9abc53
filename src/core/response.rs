//! HTTP 응답 작성기
//!
//! 모든 핸들러와 에러 응답은 [`write_response`] 하나를 거쳐 만들어집니다.
//! 응답을 값으로 반환하므로 한 요청에 본문을 두 번 쓰는 일은 타입 수준에서 불가능합니다.

use std::error::Error as StdError;

use actix_web::HttpResponse;
use serde::Serialize;

use crate::core::errno::decode;
use crate::core::errors::AppError;

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrResponse<'a> {
    /// 업무 에러 코드
    pub code: &'a str,
    /// 외부에 노출 가능한 에러 메시지
    pub message: &'a str,
}

/// 에러 또는 데이터를 HTTP 응답으로 변환합니다.
///
/// - `err`가 있으면 디코딩한 상태 코드와 `{code, message}` 본문 (`data`는 무시)
/// - `err`가 없고 `data`가 있으면 200과 JSON 본문
/// - 둘 다 없으면 200과 빈 본문
pub fn write_response<T: Serialize>(err: Option<&AppError>, data: Option<T>) -> HttpResponse {
    if let Some(err) = err {
        let (status, code, message) = decode(Some(err as &(dyn StdError + 'static)));
        return HttpResponse::build(status).json(ErrResponse { code, message });
    }

    match data {
        Some(data) => HttpResponse::Ok().json(data),
        None => HttpResponse::Ok().finish(),
    }
}
