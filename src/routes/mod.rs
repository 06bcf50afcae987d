use actix_web::{web, HttpResponse, Responder};

use crate::types::{AppState, HealthStatus, ResponsePayload};

mod mapping;

// Handler function for the root route "/"
async fn index() -> impl Responder {
    HttpResponse::Ok().json(ResponsePayload {
        status: 200,
        message: String::from("Welcome and have a great time!"),
    })
}

// Handler function for the health check endpoint
async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let db_health = match &data.db {
        Some(db) => Some(db.health_check().await),
        None => None,
    };

    HttpResponse::Ok().json(HealthStatus {
        status: String::from("OK"),
        version: data.version.clone(),
        storage: data.storage,
        db_health,
        uptime_seconds: data.start_time.elapsed().as_secs(),
    })
}

// Configure all routes function
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
    cfg.route("/health", web::get().to(health_check));
    mapping::configure_routes(cfg);
}
