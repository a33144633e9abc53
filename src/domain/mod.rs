//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── dto        - HTTP 요청 본문과 검증 규칙
//! └── entities   - 저장소에 영속되는 레코드
//! ```
//!
//! 요청 DTO는 서비스 계층에서 엔티티로 변환된 뒤 저장소로 전달됩니다.
//!
//! ```rust,ignore
//! let user = UserM::from(request);
//! ```

pub mod dto;
pub mod entities;
