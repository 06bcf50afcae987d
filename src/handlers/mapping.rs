use actix_web::{web, HttpResponse, Responder};
use log::debug;
use serde_json::json;
use validator::Validate;

use crate::{
    errors::AppError,
    models::{CreateMappingDto, MappingResponseDto, UpdateMappingDto},
    services::{MappingServiceTrait, MappingServiceType},
    types::Result,
};

fn not_found(shortcode: &str) -> AppError {
    AppError::NotFound(format!("Shortcode '{}' not found", shortcode))
}

/// Create mapping route handler
pub async fn create_handler(
    dto: web::Json<CreateMappingDto>,
    service: web::Data<MappingServiceType>,
) -> Result<impl Responder> {
    let dto = dto.into_inner();
    dto.validate()?;

    let mapping = service.create(dto.original_url, dto.shortcode).await?;
    Ok(HttpResponse::Created().json(json!({
        "data": MappingResponseDto::from(mapping),
        "message": "Successfully created URL",
    })))
}

/// Retrieve mapping route handler, counts as an access
pub async fn get_handler(
    path: web::Path<String>,
    service: web::Data<MappingServiceType>,
) -> Result<impl Responder> {
    let shortcode = path.into_inner();
    debug!("Lookup requested for code: {}", shortcode);

    let mapping = service
        .retrieve(&shortcode)
        .await?
        .ok_or_else(|| not_found(&shortcode))?;

    Ok(HttpResponse::Ok().json(json!({
        "data": MappingResponseDto::from(mapping),
        "message": "Successfully retrieved URL",
    })))
}

/// Update mapping route handler
pub async fn update_handler(
    path: web::Path<String>,
    dto: web::Json<UpdateMappingDto>,
    service: web::Data<MappingServiceType>,
) -> Result<impl Responder> {
    let shortcode = path.into_inner();
    let dto = dto.into_inner();
    dto.validate()?;

    let mapping = service
        .update(&shortcode, dto.original_url)
        .await?
        .ok_or_else(|| not_found(&shortcode))?;

    Ok(HttpResponse::Ok().json(json!({
        "data": MappingResponseDto::from(mapping),
        "message": "Successfully updated URL",
    })))
}

/// Delete mapping route handler
pub async fn delete_handler(
    path: web::Path<String>,
    service: web::Data<MappingServiceType>,
) -> Result<impl Responder> {
    let shortcode = path.into_inner();

    if service.delete(&shortcode).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(not_found(&shortcode))
    }
}
