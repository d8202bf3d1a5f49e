use actix_web::{get, http::header::ContentType, HttpResponse, Responder};

#[utoipa::path(
    get,
    path = "/health-check",
    summary = "서버 상태 확인",
    responses(
        (status = 200, description = "서버가 정상 동작 중", body = String, example = "OK")
    ),
    tag = "health check",
)]
#[get("/health-check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("OK")
}
