//! # Data Transfer Objects
//!
//! HTTP 본문과 매핑되는 요청 타입입니다. 필드 검증은 `validator` derive로 선언합니다.
//!
//! ```rust,ignore
//! use validator::Validate;
//! use crate::domain::dto::users::CreateUserRequest;
//!
//! let request: CreateUserRequest = serde_json::from_slice(&body)?;
//! request.validate()?;
//! ```

pub mod users;
