//! 사용자 비즈니스 로직

pub mod user_service;

use async_trait::async_trait;

use crate::core::{AppResult, RequestContext};
use crate::domain::dto::users::CreateUserRequest;

/// 사용자 관련 유스케이스
#[async_trait]
pub trait UserBiz: Send + Sync {
    /// 검증을 통과한 요청으로 사용자를 만듭니다.
    async fn create(&self, ctx: &RequestContext, request: CreateUserRequest) -> AppResult<()>;
}
