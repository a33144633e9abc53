//! # 라우팅과 애플리케이션 조립
//!
//! 저장소 → 비즈니스 계층 → 컨트롤러 순으로 의존성을 생성자에 주입하고,
//! 미들웨어 체인과 라우트를 붙인 `App`을 만듭니다.
//!
//! ```rust,ignore
//! let state = AppState::new(store, &config);
//! HttpServer::new(move || build_app(state.clone()))
//! ```

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App};

use crate::config::AppConfig;
use crate::handlers;
use crate::handlers::users::UserController;
use crate::middlewares::{cors, NoCache, Recovery, RequestIdMiddleware, Secure};
use crate::repositories::Store;
use crate::services::{Biz, BizLayer};

/// 액세스 로그 형식. 응답의 요청 ID를 함께 남긴다.
const ACCESS_LOG_FORMAT: &str = "%a \"%r\" %s %b %T %{X-Request-ID}o";

/// 워커마다 복제되는 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    users: web::Data<UserController>,
    cors_allowed_origins: Vec<String>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &AppConfig) -> Self {
        let biz: Arc<dyn Biz> = Arc::new(BizLayer::new(store, config.password.bcrypt_cost));

        Self {
            users: web::Data::new(UserController::new(biz)),
            cors_allowed_origins: config.server.cors_allowed_origins.clone(),
        }
    }
}

/// 미들웨어 체인, 라우트, 기본 404 응답이 붙은 `App`을 만듭니다.
pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state.users.clone())
        // Content-Type이 없어도 본문을 JSON으로 해석한다
        .app_data(web::JsonConfig::default().content_type_required(false))
        .wrap(NormalizePath::trim())
        .wrap(Secure)
        .wrap(cors(&state.cors_allowed_origins))
        .wrap(NoCache)
        .wrap(RequestIdMiddleware)
        .wrap(Logger::new(ACCESS_LOG_FORMAT))
        .wrap(Recovery)
        .configure(configure_all_routes)
        .default_service(web::to(handlers::page_not_found))
}

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health::health_check);

    configure_user_routes(cfg);
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/v1/users").service(handlers::users::create_user));
}
