use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::database::TravelStore;

pub const LIVENESS_TEXT: &str = "🌍 Trip Planner API is running!";

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// "connected" or "unreachable"
    pub database: String,
    pub timestamp: i64,
}

/// GET / - Plain-text liveness answer
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LIVENESS_TEXT)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up; `database` reports the store ping", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<dyn TravelStore>) -> impl Responder {
    let database = match store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            log::warn!("⚠️  Health check could not reach MongoDB: {}", e);
            "unreachable"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
