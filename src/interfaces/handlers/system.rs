use actix_web::{get, HttpResponse, Responder};
use humantime::format_duration;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::uptime_at;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub uptime: String,
}

/// Liveness only. Touches neither the store nor the mail relay.
#[get("/health")]
pub async fn health_check() -> impl Responder {
    let now_utc = Utc::now();

    HttpResponse::Ok().json(HealthCheckResponse {
        success: true,
        message: "Server is running".to_string(),
        timestamp: now_utc.to_rfc3339(),
        uptime: format_duration(uptime_at(now_utc)).to_string(),
    })
}

pub async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "message": "Route not found"
    }))
}
