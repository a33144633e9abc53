//! 비즈니스 로직 계층
//!
//! 핸들러는 [`Biz`] trait을 통해 도메인별 비즈니스 객체를 얻습니다.
//! 구현체 [`BizLayer`]는 조립 시점에 저장소를 주입받아 만들어집니다.
//!
//! ```rust,ignore
//! let biz: Arc<dyn Biz> = Arc::new(BizLayer::new(store, config.password.bcrypt_cost));
//! biz.users().create(&ctx, request).await?;
//! ```

pub mod users;

use std::sync::Arc;

use crate::repositories::Store;
use users::user_service::UserService;
use users::UserBiz;

/// 도메인별 비즈니스 객체 묶음
pub trait Biz: Send + Sync {
    fn users(&self) -> Arc<dyn UserBiz>;
}

pub struct BizLayer {
    users: Arc<dyn UserBiz>,
}

impl BizLayer {
    pub fn new(store: Arc<dyn Store>, bcrypt_cost: u32) -> Self {
        Self {
            users: Arc::new(UserService::new(store, bcrypt_cost)),
        }
    }
}

impl Biz for BizLayer {
    fn users(&self) -> Arc<dyn UserBiz> {
        Arc::clone(&self.users)
    }
}
