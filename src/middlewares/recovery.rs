//! panic 복구 미들웨어
//!
//! 하위 서비스의 `call` 또는 반환된 future에서 발생한 panic을 잡아
//! `InternalError` 봉투를 담은 500 응답으로 바꿉니다. 워커 스레드는 계속 요청을 처리합니다.

use std::any::Any;
use std::future::{ready, Ready};
use std::panic::{catch_unwind, AssertUnwindSafe};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use log::error;
use thiserror::Error;

use crate::core::errno::INTERNAL_SERVER_ERROR;
use crate::core::{write_response, AppError, RequestId};
use crate::middlewares::request_id::{assign_request_id, write_request_id_header};

/// 복구된 panic
///
/// 응답 본문은 일반 내부 오류와 같고, 요청 ID 헤더가 함께 실립니다.
#[derive(Error, Debug)]
#[error("panic recovered while handling request {request_id}")]
pub struct RecoveredPanic {
    request_id: RequestId,
}

impl ResponseError for RecoveredPanic {
    fn status_code(&self) -> StatusCode {
        INTERNAL_SERVER_ERROR.http()
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = write_response::<()>(Some(&AppError::from(INTERNAL_SERVER_ERROR.clone())), None);
        write_request_id_header(res.headers_mut(), &self.request_id);
        res
    }
}

pub struct Recovery;

impl<S, B> Transform<S, ServiceRequest> for Recovery
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RecoveryService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RecoveryService { service }))
    }
}

pub struct RecoveryService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RecoveryService<S>
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
        // 복구 응답에도 같은 ID를 실어야 하므로 하위 단계보다 먼저 할당한다
        let request_id = assign_request_id(&req);

        let fut = match catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(panic) => return Box::pin(ready(Err(recovered(request_id, panic)))),
        };

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(result) => result,
                Err(panic) => Err(recovered(request_id, panic)),
            }
        })
    }
}

fn recovered(request_id: RequestId, panic: Box<dyn Any + Send>) -> Error {
    error!(
        request_id = request_id.as_str();
        "Recovered from panic: {}",
        panic_message(panic.as_ref())
    );

    RecoveredPanic { request_id }.into()
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::{test, web, App, HttpResponse};
    use serde_json::{json, Value};

    use super::*;
    use crate::middlewares::request_id::{RequestIdMiddleware, X_REQUEST_ID};

    async fn boom() -> HttpResponse {
        panic!("handler exploded");
    }

    async fn fine() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_panic_becomes_internal_error() {
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .wrap(Recovery)
                .route("/boom", web::get().to(boom)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/boom")
            .insert_header((X_REQUEST_ID, "panic-1"))
            .to_request();
        let err = test::try_call_service(&app, req).await.err().unwrap();
        let res = err.error_response();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.headers().get(X_REQUEST_ID).unwrap(), "panic-1");
        let body: Value = serde_json::from_slice(&to_bytes(res.into_body()).await.unwrap()).unwrap();
        assert_eq!(body, json!({"code": "InternalError", "message": "Internal server error."}));
    }

    #[actix_web::test]
    async fn test_service_keeps_serving_after_panic() {
        let app = test::init_service(
            App::new()
                .wrap(Recovery)
                .route("/boom", web::get().to(boom))
                .route("/fine", web::get().to(fine)),
        )
        .await;

        let err = test::try_call_service(&app, test::TestRequest::get().uri("/boom").to_request())
            .await
            .err()
            .unwrap();
        assert!(err.as_error::<RecoveredPanic>().is_some());

        let res = test::call_service(&app, test::TestRequest::get().uri("/fine").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_panic_message() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42_u8), "non-string panic payload");
    }
}
