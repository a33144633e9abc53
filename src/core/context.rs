//! 요청 단위 컨텍스트
//!
//! 미들웨어가 요청 진입 시 [`RequestId`]를 request extension에 저장하고,
//! 핸들러는 [`RequestContext`] extractor로 이를 꺼내 서비스와 저장소 계층까지
//! 전달합니다. 요청이 끝나면 함께 버려지며 영구 저장되지 않습니다.

use std::fmt;
use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::HeaderValue;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

/// 요청 식별자
///
/// 한 요청 안에서는 처음 할당된 값이 끝까지 유지됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// 새 UUID v4 식별자를 생성합니다.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// 수신 헤더 값을 그대로 식별자로 사용합니다.
    ///
    /// 비어 있거나 visible ASCII가 아닌 값은 `None`입니다.
    pub fn from_header(value: &HeaderValue) -> Option<Self> {
        value
            .to_str()
            .ok()
            .filter(|raw| !raw.is_empty())
            .map(|raw| Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 하위 계층에 전달되는 요청 컨텍스트
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: RequestId,
}

impl RequestContext {
    pub fn new(request_id: RequestId) -> Self {
        Self { request_id }
    }

    /// 로그 상관관계 분석용 요청 ID
    pub fn request_id(&self) -> &str {
        self.request_id.as_str()
    }
}

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    /// extension에 저장된 요청 ID를 사용합니다. 미들웨어 없이 호출된 경우
    /// 새로 생성해 저장하므로 같은 요청 안에서는 항상 같은 값을 돌려줍니다.
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let existing = req.extensions().get::<RequestId>().cloned();
        let request_id = match existing {
            Some(id) => id,
            None => {
                let id = RequestId::generate();
                req.extensions_mut().insert(id.clone());
                id
            }
        };

        ready(Ok(RequestContext::new(request_id)))
    }
}
