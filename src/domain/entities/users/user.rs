//! 사용자 레코드

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::dto::users::CreateUserRequest;

/// 저장소에 저장되는 사용자
///
/// `password`는 저장 전에 서비스 계층에서 bcrypt 해시로 교체됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserM {
    /// 저장소가 부여하는 식별자
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password: String,
    pub nickname: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<CreateUserRequest> for UserM {
    fn from(req: CreateUserRequest) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username: req.username,
            password: req.password,
            nickname: req.nickname,
            email: req.email,
            phone: req.phone,
            created_at: now,
            updated_at: now,
        }
    }
}
