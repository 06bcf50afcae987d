use std::time::Instant;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{debug, info};

use crate::{
    config::{Config, Environment, ServerConfig},
    errors::AppError,
    middleware::RequestLogger,
    repositories, routes, services,
    types::AppState,
};

// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;

// Setup logging with custom format and configuration
fn setup_logging(config: &Config) -> AppResult<()> {
    let log_level = match config.app.environment {
        Environment::Development => config.app.log_level.clone(),
        Environment::Testing => "debug,actix_web=info".to_string(),
        Environment::Production => "info,actix_web=warn".to_string(),
    };

    let env = Env::default()
        .filter_or("RUST_LOG", log_level)
        .write_style_or("RUST_LOG_STYLE", "always");

    env_logger::try_init_from_env(env)
        .map_err(|e| AppError::Logger(format!("Failed to initialize logger: {}", e)))
}

/// JSON extractor settings: malformed bodies become 400 validation errors
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

fn build_cors(config: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static(
            crate::middleware::REQUEST_ID_HEADER,
        )])
        .max_age(3600);

    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    config
        .cors_allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

pub async fn server() -> AppResult<()> {
    let config = Config::load()?;

    setup_logging(&config)?;

    let start_time = Instant::now();

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {:?}", config.app.environment);
    info!(
        "Binding to {}:{} with {} workers",
        config.server.host, config.server.port, config.server.workers
    );

    if config.app.environment == Environment::Development {
        debug!("Full configuration: {:?}", config);
    }

    let (repository, database) = repositories::connect(&config).await?;

    // One service for all workers so every worker sees the same storage
    let mapping_service = web::Data::new(services::build_mapping_service(
        repository,
        &config.shortcode,
    ));
    let app_state = web::Data::new(AppState {
        start_time,
        version: config.app.version.clone(),
        storage: config.storage,
        db: database.clone(),
    });

    let enable_debug_logging = config.app.environment != Environment::Production;

    let log_format = if enable_debug_logging {
        "%a \"%r\" %s %b %T \"%{Referer}i\" \"%{User-Agent}i\" %{x-request-id}o"
    } else {
        "%a \"%r\" %s %b %T"
    };

    let server_config = config.server.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(mapping_service.clone())
            .app_data(json_config())
            .wrap(build_cors(&server_config))
            .wrap(Logger::new(log_format))
            .wrap(RequestLogger::new(enable_debug_logging))
            .configure(routes::configure_routes)
    })
    .workers(config.server.workers)
    .bind((config.server.host.to_string(), config.server.port))?
    .run()
    .await?;

    if let Some(db) = database {
        db.shutdown().await;
    }

    info!("Server stopped");
    Ok(())
}
