use actix_web::web;

use crate::handlers::{create_handler, delete_handler, get_handler, update_handler};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/urls")
            .route("", web::post().to(create_handler))
            .route("/{shortcode}", web::get().to(get_handler))
            .route("/{shortcode}", web::put().to(update_handler))
            .route("/{shortcode}", web::delete().to(delete_handler)),
    );
}
