use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Contact form API",
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/api/health"
    }))
}
