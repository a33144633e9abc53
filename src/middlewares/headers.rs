//! 응답 헤더 미들웨어
//!
//! - [`NoCache`]: 브라우저와 프록시가 응답을 캐시하지 않도록 합니다.
//! - [`Secure`]: 클릭재킹, MIME 스니핑, XSS 방어 헤더를 붙입니다. HTTPS 연결이면
//!   HSTS도 추가합니다.
//!
//! 두 미들웨어 모두 하위 단계가 이미 설정한 같은 이름의 헤더를 덮어씁니다.

use std::future::{ready, Ready};
use std::time::SystemTime;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{
    self, HeaderName, HeaderValue, HttpDate, CACHE_CONTROL, EXPIRES, LAST_MODIFIED,
    STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;

const NO_CACHE_CONTROL: &str = "no-cache, no-store, max-age=0, must-revalidate, value";
const EXPIRES_IN_PAST: &str = "Thu, 01 Jan 1970 00:00:00 GMT";
const HSTS_ONE_YEAR: &str = "max-age=31536000";

/// 캐시 금지 헤더
pub struct NoCache;

/// 보안 헤더
pub struct Secure;

#[derive(Clone, Copy)]
enum HeaderSet {
    NoCache,
    Secure,
}

impl HeaderSet {
    /// 요청을 보고 응답에 실을 헤더를 정합니다.
    fn headers_for(self, req: &ServiceRequest) -> Vec<(HeaderName, HeaderValue)> {
        match self {
            HeaderSet::NoCache => {
                let mut headers = vec![
                    (CACHE_CONTROL, HeaderValue::from_static(NO_CACHE_CONTROL)),
                    (EXPIRES, HeaderValue::from_static(EXPIRES_IN_PAST)),
                ];
                let now = HttpDate::from(SystemTime::now()).to_string();
                if let Ok(value) = HeaderValue::from_str(&now) {
                    headers.push((LAST_MODIFIED, value));
                }
                headers
            }
            HeaderSet::Secure => {
                let mut headers = vec![
                    (X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
                    (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
                    (X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block")),
                ];
                if req.connection_info().scheme() == "https" {
                    headers.push((STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS_ONE_YEAR)));
                }
                headers
            }
        }
    }
}

macro_rules! header_transform {
    ($middleware:ty, $set:expr) => {
        impl<S, B> Transform<S, ServiceRequest> for $middleware
        where
            S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
            S::Future: 'static,
            B: 'static,
        {
            type Response = ServiceResponse<B>;
            type Error = Error;
            type Transform = HeaderService<S>;
            type InitError = ();
            type Future = Ready<Result<Self::Transform, Self::InitError>>;

            fn new_transform(&self, service: S) -> Self::Future {
                ready(Ok(HeaderService { service, set: $set }))
            }
        }
    };
}

header_transform!(NoCache, HeaderSet::NoCache);
header_transform!(Secure, HeaderSet::Secure);

pub struct HeaderService<S> {
    service: S,
    set: HeaderSet,
}

impl<S, B> Service<ServiceRequest> for HeaderService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let headers = self.set.headers_for(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let response_headers: &mut header::HeaderMap = res.headers_mut();
            for (name, value) in headers {
                response_headers.insert(name, value);
            }
            Ok(res)
        })
    }
}
