//! 메모리 사용자 저장소

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use log::debug;
use mongodb::bson::oid::ObjectId;

use crate::core::RequestContext;
use crate::domain::entities::users::UserM;
use crate::repositories::StoreError;
use crate::repositories::users::UserStore;

/// `username`을 키로 하는 메모리 저장소
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, UserM>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryUserRepository {
    fn get(&self, username: &str) -> Option<UserM> {
        self.users.read().unwrap().get(username).cloned()
    }

    fn len(&self) -> usize {
        self.users.read().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn create(&self, ctx: &RequestContext, mut user: UserM) -> Result<UserM, StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if users.contains_key(&user.username) {
            return Err(StoreError::ConstraintViolation {
                field: "username".to_string(),
            });
        }

        user.id = Some(ObjectId::new());
        users.insert(user.username.clone(), user.clone());
        debug!(request_id = ctx.request_id(); "user stored in memory");

        Ok(user)
    }
}
