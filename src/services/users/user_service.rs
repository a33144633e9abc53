//! # 사용자 서비스
//!
//! 사용자 생성 흐름:
//!
//! 1. 요청 DTO를 [`UserM`]으로 변환
//! 2. 비밀번호를 bcrypt로 해싱 (blocking 스레드풀에서 실행)
//! 3. 저장소에 저장
//! 4. 저장소 에러 분류
//!    - `username` 유일성 위반 → [`ERR_USER_ALREADY_EXIST`]
//!    - 그 외 → 로그를 남기고 500으로 전파

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use log::{error, info};

use crate::core::errno::ERR_USER_ALREADY_EXIST;
use crate::core::{AppError, AppResult, ErrorContext, RequestContext};
use crate::domain::dto::users::CreateUserRequest;
use crate::domain::entities::users::UserM;
use crate::repositories::{Store, StoreError};
use crate::services::users::UserBiz;

pub struct UserService {
    store: Arc<dyn Store>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    async fn hash_password(&self, password: String) -> AppResult<String> {
        let cost = self.bcrypt_cost;
        web::block(move || bcrypt::hash(password, cost))
            .await
            .context("비밀번호 해싱 작업 실행 실패")?
            .context("비밀번호 해싱 실패")
    }
}

#[async_trait]
impl UserBiz for UserService {
    async fn create(&self, ctx: &RequestContext, request: CreateUserRequest) -> AppResult<()> {
        let mut user = UserM::from(request);
        user.password = self.hash_password(std::mem::take(&mut user.password)).await?;

        match self.store.users().create(ctx, user).await {
            Ok(created) => {
                info!(
                    request_id = ctx.request_id(),
                    username = created.username.as_str();
                    "User created"
                );
                Ok(())
            }
            Err(StoreError::ConstraintViolation { field }) if field == "username" => {
                Err(ERR_USER_ALREADY_EXIST.clone().into())
            }
            Err(e) => {
                error!(request_id = ctx.request_id(); "Failed to create user: {}", e);
                Err(AppError::Storage(e))
            }
        }
    }
}
