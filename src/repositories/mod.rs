//! 데이터 액세스 계층
//!
//! 비즈니스 계층은 [`Store`] trait만 알고, 실제 구현(메모리 또는 MongoDB)은
//! 조립 시점에 [`DataStore::connect`]가 설정을 보고 고릅니다.
//!
//! ```rust,ignore
//! let store: Arc<dyn Store> = Arc::new(DataStore::connect(&config.storage).await?);
//! let created = store.users().create(&ctx, user).await?;
//! ```

pub mod users;

use std::sync::Arc;

use log::info;
use thiserror::Error;

use crate::config::{StorageBackend, StorageConfig};
use crate::db::Database;
use users::memory_repo::MemoryUserRepository;
use users::user_repo::UserRepository;
use users::UserStore;

/// 저장소 계층 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// 유일성 제약 위반. `field`는 충돌한 필드 이름
    #[error("unique constraint violated on {field}")]
    ConstraintViolation { field: String },

    /// 그 밖의 저장소 실패 (연결, 직렬화 등)
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// 엔티티별 저장소 묶음
pub trait Store: Send + Sync {
    fn users(&self) -> Arc<dyn UserStore>;
}

/// 설정에 따라 선택된 저장소 구현
#[derive(Clone)]
pub struct DataStore {
    users: Arc<dyn UserStore>,
}

impl DataStore {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// 프로세스 메모리 저장소
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryUserRepository::new()))
    }

    /// 설정된 백엔드에 연결합니다. MongoDB는 연결 확인과 인덱스 생성까지 마칩니다.
    pub async fn connect(config: &StorageConfig) -> Result<Self, StoreError> {
        match config.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageBackend::MongoDb => {
                let database = Database::connect(config)
                    .await
                    .map_err(|e| StoreError::Backend(e.to_string()))?;

                let users = UserRepository::new(Arc::new(database));
                users.create_indexes().await?;

                Ok(Self::new(Arc::new(users)))
            }
        }
    }
}

impl Store for DataStore {
    fn users(&self) -> Arc<dyn UserStore> {
        Arc::clone(&self.users)
    }
}

const _: fn() = || {
    fn assert_store<T: Store>() {}
    assert_store::<DataStore>();
};
