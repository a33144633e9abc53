//! 사용자 API 컨트롤러

use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use log::info;
use validator::Validate;

use crate::core::errno::{ERR_BIND, ERR_INVALID_PARAMETER};
use crate::core::{write_response, AppError, AppResult, RequestContext};
use crate::domain::dto::users::CreateUserRequest;
use crate::services::Biz;

/// 사용자 엔드포인트가 공유하는 컨트롤러
///
/// 앱 데이터(`web::Data<UserController>`)로 등록되어 모든 워커가 같은 인스턴스를 씁니다.
pub struct UserController {
    biz: Arc<dyn Biz>,
}

impl UserController {
    pub fn new(biz: Arc<dyn Biz>) -> Self {
        Self { biz }
    }

    /// 요청 본문을 바인딩, 검증한 뒤 비즈니스 계층에 사용자 생성을 위임합니다.
    ///
    /// 비즈니스 계층의 에러는 그대로 전달됩니다.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        payload: Result<web::Json<CreateUserRequest>, actix_web::Error>,
    ) -> AppResult<HttpResponse> {
        info!(request_id = ctx.request_id(); "Create user function called");

        let request = payload
            .map_err(|_| AppError::from(ERR_BIND.clone()))?
            .into_inner();

        request
            .validate()
            .map_err(|e| AppError::from(ERR_INVALID_PARAMETER.with_message(e.to_string())))?;

        self.biz.users().create(ctx, request).await?;

        Ok(write_response::<()>(None, None))
    }
}

#[post("")]
pub async fn create_user(
    ctx: RequestContext,
    controller: web::Data<UserController>,
    payload: Result<web::Json<CreateUserRequest>, actix_web::Error>,
) -> AppResult<HttpResponse> {
    controller.create(&ctx, payload).await
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::{test, App, ResponseError};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;
    use crate::core::errno::ERR_USER_ALREADY_EXIST;
    use crate::core::RequestId;
    use crate::services::users::UserBiz;

    struct StubBiz(Arc<dyn UserBiz>);

    impl Biz for StubBiz {
        fn users(&self) -> Arc<dyn UserBiz> {
            Arc::clone(&self.0)
        }
    }

    struct AlwaysExists;

    #[async_trait]
    impl UserBiz for AlwaysExists {
        async fn create(&self, _ctx: &RequestContext, _req: CreateUserRequest) -> AppResult<()> {
            Err(ERR_USER_ALREADY_EXIST.clone().into())
        }
    }

    struct Unreachable;

    #[async_trait]
    impl UserBiz for Unreachable {
        async fn create(&self, _ctx: &RequestContext, _req: CreateUserRequest) -> AppResult<()> {
            panic!("business layer must not be called for invalid input");
        }
    }

    fn controller(users: impl UserBiz + 'static) -> UserController {
        UserController::new(Arc::new(StubBiz(Arc::new(users))))
    }

    fn valid_body() -> Value {
        json!({
            "username": "belm",
            "password": "miniblog1234",
            "nickname": "belm",
            "email": "belm@qq.com",
            "phone": "18888888888"
        })
    }

    #[actix_web::test]
    async fn test_validation_failure_skips_business_layer() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(controller(Unreachable)))
                .service(web::scope("/v1/users").service(create_user)),
        )
        .await;

        let mut body = valid_body();
        body["phone"] = json!("123");
        let req = test::TestRequest::post().uri("/v1/users").set_json(body).to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "InvalidParameter");
        assert!(body["message"].as_str().unwrap().contains("phone"));
    }

    #[actix_web::test]
    async fn test_business_error_is_forwarded() {
        let ctx = RequestContext::new(RequestId::generate());
        let payload = Ok(web::Json(serde_json::from_value(valid_body()).unwrap()));

        let err = controller(AlwaysExists).create(&ctx, payload).await.unwrap_err();
        let res = err.error_response();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&to_bytes(res.into_body()).await.unwrap()).unwrap();
        assert_eq!(body["code"], "FailedOperation.UserAlreadyExist");
    }
}
