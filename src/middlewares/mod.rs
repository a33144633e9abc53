//! # HTTP 미들웨어
//!
//! 모든 요청은 바깥쪽부터 다음 순서로 통과합니다.
//!
//! ```text
//! Recovery → Logger → RequestId → NoCache → Cors → Secure → NormalizePath → 라우터
//! ```
//!
//! - [`recovery::Recovery`]: 하위 단계의 panic을 500 응답으로 변환
//! - [`request_id::RequestIdMiddleware`]: `X-Request-ID` 할당 및 응답 헤더 반영
//! - [`headers::NoCache`], [`headers::Secure`]: 캐시 금지, 보안 헤더
//! - [`cors::cors`]: 설정된 Origin 목록으로 CORS 처리
//!
//! `RequestIdMiddleware`가 CORS 바깥에 있으므로 CORS가 직접 응답하는
//! preflight 요청에도 요청 ID가 붙습니다.

pub mod cors;
pub mod headers;
pub mod recovery;
pub mod request_id;

pub use cors::cors;
pub use headers::{NoCache, Secure};
pub use recovery::Recovery;
pub use request_id::{RequestIdMiddleware, X_REQUEST_ID};
