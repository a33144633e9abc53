//! # Core Module
//!
//! 계층(핸들러 / 서비스 / 저장소)을 가로지르는 공통 요소를 모아 둔 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`errno`] - 에러 코드 레지스트리
//! - **Errno**: `(HTTP 상태, 업무 코드, 메시지)` 불변 값
//! - **decode**: 임의의 에러를 세 값으로 해석, 알 수 없는 에러는 `InternalError`
//!
//! ### [`errors`] - 애플리케이션 에러
//! - **AppError**: `Errno` 또는 불투명한 내부 실패
//! - **HTTP 통합**: `actix_web::ResponseError` 구현
//!
//! ### [`response`] - 응답 작성기
//! - **write_response**: 에러 봉투 또는 데이터 본문을 작성
//!
//! ### [`context`] - 요청 컨텍스트
//! - **RequestId / RequestContext**: 요청 ID를 하위 계층까지 전달
//!
//! ## 에러 흐름
//!
//! ```text
//! Repository ──StoreError──▶ Service ──AppError──▶ Handler ──▶ write_response
//!                              │                                  │
//!                              └─ ConstraintViolation(username)   └─ decode()
//!                                 → ERR_USER_ALREADY_EXIST
//! ```

pub mod context;
pub mod errno;
pub mod errors;
pub mod response;

pub use context::{RequestContext, RequestId};
pub use errno::Errno;
pub use errors::{AppError, AppResult, ErrorContext};
pub use response::write_response;
