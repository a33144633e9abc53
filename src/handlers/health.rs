use actix_web::{get, HttpResponse};
use log::info;
use serde_json::json;

use crate::core::{write_response, RequestContext};

/// 헬스 체크
#[get("/health")]
pub async fn health_check(ctx: RequestContext) -> HttpResponse {
    info!(request_id = ctx.request_id(); "Healthz function called");

    write_response(None, Some(json!({ "status": "OK" })))
}
