//! 사용자 API 요청 DTO

pub mod request;

pub use request::CreateUserRequest;
