//! 사용자 저장소
//!
//! - [`user_repo::UserRepository`]: MongoDB `users` 컬렉션
//! - [`memory_repo::MemoryUserRepository`]: 프로세스 메모리

pub mod memory_repo;
pub mod user_repo;

use async_trait::async_trait;

use crate::core::RequestContext;
use crate::domain::entities::users::UserM;
use crate::repositories::StoreError;

/// 사용자 레코드 저장소
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 사용자를 저장하고 식별자가 채워진 레코드를 반환합니다.
    ///
    /// 같은 `username`이 이미 있으면 `ConstraintViolation { field: "username" }`입니다.
    async fn create(&self, ctx: &RequestContext, user: UserM) -> Result<UserM, StoreError>;
}
