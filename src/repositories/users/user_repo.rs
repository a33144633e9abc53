//! # MongoDB 사용자 리포지토리
//!
//! `users` 컬렉션에 사용자를 저장합니다. 중복 검사는 별도 조회 없이
//! `username` 유니크 인덱스에 맡기고, 중복 키 에러(11000)를
//! [`StoreError::ConstraintViolation`]으로 변환합니다.
//!
//! | 인덱스 | 키 | 옵션 |
//! |--------|----|------|
//! | `username_unique` | `username` | unique |
//! | `createdAt_desc` | `createdAt` | - |

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};
use mongodb::bson::doc;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::core::RequestContext;
use crate::db::Database;
use crate::domain::entities::users::UserM;
use crate::repositories::StoreError;
use crate::repositories::users::UserStore;

const COLLECTION: &str = "users";

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY: i32 = 11000;

/// 유니크 인덱스 이름 접미사. `<field>_unique` 형태로 이름을 붙입니다.
const UNIQUE_SUFFIX: &str = "_unique";

pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<UserM> {
        self.db.get_database().collection::<UserM>(COLLECTION)
    }

    /// 컬렉션 인덱스를 생성합니다. 이미 있으면 아무 일도 하지 않습니다.
    pub async fn create_indexes(&self) -> Result<(), StoreError> {
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(format!("username{}", UNIQUE_SUFFIX))
                    .build(),
            )
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("createdAt_desc".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([username_index, created_at_index])
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, ctx: &RequestContext, mut user: UserM) -> Result<UserM, StoreError> {
        let result = self
            .collection()
            .insert_one(&user)
            .await
            .map_err(|e| map_write_error(ctx, e))?;

        user.id = result.inserted_id.as_object_id();
        debug!(request_id = ctx.request_id(), collection = COLLECTION; "user inserted");

        Ok(user)
    }
}

fn map_write_error(ctx: &RequestContext, err: MongoError) -> StoreError {
    let duplicate = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY => {
            Some(we.message.as_str())
        }
        ErrorKind::Command(ce) if ce.code == DUPLICATE_KEY => Some(ce.message.as_str()),
        _ => None,
    };

    match duplicate {
        Some(message) => StoreError::ConstraintViolation {
            field: duplicate_key_field(message).unwrap_or("unknown").to_string(),
        },
        None => {
            error!(request_id = ctx.request_id(); "MongoDB insert failed: {}", err);
            StoreError::Backend(err.to_string())
        }
    }
}

/// 중복 키 에러 메시지에서 충돌한 필드 이름을 꺼냅니다.
///
/// `E11000 duplicate key error collection: miniblog.users index: username_unique dup key: ...`
/// 에서 `username`을 반환합니다.
fn duplicate_key_field(message: &str) -> Option<&str> {
    let index = message.split("index: ").nth(1)?.split_whitespace().next()?;
    Some(index.strip_suffix(UNIQUE_SUFFIX).unwrap_or(index))
}
