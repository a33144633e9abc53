//! 요청 ID 미들웨어
//!
//! 수신 `X-Request-ID` 헤더가 유효하면 그대로 쓰고, 없으면 UUID v4를 생성합니다.
//! 결정된 값은 request extension에 저장되고 응답 헤더에 그대로 실립니다.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::core::RequestId;

/// 요청 ID 헤더 이름
pub const X_REQUEST_ID: &str = "x-request-id";

/// 요청에 ID를 할당하고 반환합니다.
///
/// 이미 할당된 요청이면 기존 값을 그대로 돌려줍니다.
pub fn assign_request_id(req: &ServiceRequest) -> RequestId {
    if let Some(existing) = req.extensions().get::<RequestId>() {
        return existing.clone();
    }

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(RequestId::from_header)
        .unwrap_or_else(RequestId::generate);

    req.extensions_mut().insert(request_id.clone());
    request_id
}

/// 응답 헤더에 요청 ID를 기록합니다.
pub fn write_request_id_header(headers: &mut HeaderMap, request_id: &RequestId) {
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        headers.insert(HeaderName::from_static(X_REQUEST_ID), value);
    }
}

pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestIdService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService { service }))
    }
}

pub struct RequestIdService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
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
        let request_id = assign_request_id(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            write_request_id_header(res.headers_mut(), &request_id);
            Ok(res)
        })
    }
}
