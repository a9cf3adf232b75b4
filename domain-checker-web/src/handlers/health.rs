use actix_web::http::header;
use actix_web::{HttpResponse, get};
use serde_json::json;

/// Liveness probe.
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(json!({ "status": "ok" }))
}
