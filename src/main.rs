use std::process;

use log::error;

use shortcode_service::{app, errors::AppError};

/// Process exit status for an error that stopped the server
fn exit_code(err: &AppError) -> i32 {
    match err {
        AppError::Config(_) => 2,
        AppError::Logger(_) => 3,
        AppError::Database(_) => 4,
        _ => 1,
    }
}

#[actix_web::main]
async fn main() {
    // Run the server with error handling for critical failures
    if let Err(err) = app::server().await {
        match &err {
            AppError::Server(e) => error!("Critical server error: {}", e),
            // The logger is not up yet when configuration or logger setup fails
            AppError::Config(e) => eprintln!("Critical configuration error: {}", e),
            AppError::Logger(e) => eprintln!("Critical logger error: {}", e),
            AppError::Database(e) => error!("Critical database error: {}", e),
            _ => error!("Unexpected error: {}", err),
        }
        process::exit(exit_code(&err));
    }
}
