//! CORS 설정

use actix_cors::Cors;
use actix_web::http::header;

/// 허용 Origin 목록으로 CORS 미들웨어를 만듭니다.
///
/// 목록이 비어 있거나 `*`를 포함하면 모든 Origin을 허용합니다.
/// preflight(`OPTIONS`) 요청은 이 미들웨어가 직접 응답합니다.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(3600);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin().send_wildcard();
    }

    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
