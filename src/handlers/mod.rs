//! HTTP 핸들러
//!
//! | 메서드 | 경로 | 핸들러 |
//! |--------|------|--------|
//! | GET | `/health` | [`health::health_check`] |
//! | POST | `/v1/users` | [`users::create_user`] |
//! | * | 그 외 | [`page_not_found`] |

pub mod health;
pub mod users;

use actix_web::HttpResponse;

use crate::core::errno::ERR_PAGE_NOT_FOUND;
use crate::core::{write_response, AppError};

/// 등록되지 않은 경로에 대한 기본 응답
pub async fn page_not_found() -> HttpResponse {
    write_response::<()>(Some(&AppError::from(ERR_PAGE_NOT_FOUND.clone())), None)
}
