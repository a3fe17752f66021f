use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::database::{parse_id, TravelStore};
use crate::models::{
    CreateDestinationRequest, DestinationPatch, DestinationResponse, ErrorResponse,
    MessageResponse,
};
use crate::utils::ApiError;

/// GET /api/destinations - Every destination, unpaginated
#[utoipa::path(
    get,
    path = "/api/destinations",
    tag = "Destinations",
    responses(
        (status = 200, description = "All destinations", body = [DestinationResponse]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[get("/destinations")]
pub async fn list_destinations(store: web::Data<dyn TravelStore>) -> Result<HttpResponse, ApiError> {
    let destinations: Vec<DestinationResponse> = store
        .list_destinations()
        .await
        .map_err(ApiError::read)?
        .into_iter()
        .map(DestinationResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(destinations))
}

#[utoipa::path(
    get,
    path = "/api/destinations/{destination_id}",
    tag = "Destinations",
    params(("destination_id" = String, Path, description = "Destination ObjectId")),
    responses(
        (status = 200, description = "Destination details", body = DestinationResponse),
        (status = 404, description = "Destination not found", body = MessageResponse),
        (status = 500, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
#[get("/destinations/{destination_id}")]
pub async fn get_destination(
    store: web::Data<dyn TravelStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let destination_id = parse_id(&path).map_err(ApiError::read)?;

    let destination = store
        .find_destination(destination_id)
        .await
        .map_err(ApiError::read)?
        .ok_or(ApiError::NotFound("Destination"))?;

    Ok(HttpResponse::Ok().json(DestinationResponse::from(destination)))
}

#[utoipa::path(
    post,
    path = "/api/destinations",
    tag = "Destinations",
    request_body = CreateDestinationRequest,
    responses(
        (status = 201, description = "Destination created", body = DestinationResponse),
        (status = 400, description = "Missing city or country, or store failure")
    )
)]
#[post("/destinations")]
pub async fn create_destination(
    store: web::Data<dyn TravelStore>,
    body: web::Json<CreateDestinationRequest>,
) -> Result<HttpResponse, ApiError> {
    let destination = body.into_inner().into_destination()?;

    let created = store
        .insert_destination(destination)
        .await
        .map_err(ApiError::write)?;
    log::info!("📍 Destination created: {}, {}", created.city, created.country);

    Ok(HttpResponse::Created().json(DestinationResponse::from(created)))
}

#[utoipa::path(
    put,
    path = "/api/destinations/{destination_id}",
    tag = "Destinations",
    params(("destination_id" = String, Path, description = "Destination ObjectId")),
    request_body = DestinationPatch,
    responses(
        (status = 200, description = "Destination updated", body = DestinationResponse),
        (status = 404, description = "Destination not found", body = MessageResponse),
        (status = 400, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
#[put("/destinations/{destination_id}")]
pub async fn update_destination(
    store: web::Data<dyn TravelStore>,
    path: web::Path<String>,
    body: web::Json<DestinationPatch>,
) -> Result<HttpResponse, ApiError> {
    let destination_id = parse_id(&path).map_err(ApiError::write)?;

    let updated = store
        .update_destination(destination_id, &body)
        .await
        .map_err(ApiError::write)?
        .ok_or(ApiError::NotFound("Destination"))?;

    Ok(HttpResponse::Ok().json(DestinationResponse::from(updated)))
}

/// DELETE /api/destinations/{destination_id} - Trips pointing at it are left as they are
#[utoipa::path(
    delete,
    path = "/api/destinations/{destination_id}",
    tag = "Destinations",
    params(("destination_id" = String, Path, description = "Destination ObjectId")),
    responses(
        (status = 200, description = "Destination deleted", body = MessageResponse),
        (status = 404, description = "Destination not found", body = MessageResponse),
        (status = 500, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
#[delete("/destinations/{destination_id}")]
pub async fn delete_destination(
    store: web::Data<dyn TravelStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let destination_id = parse_id(&path).map_err(ApiError::read)?;

    store
        .delete_destination(destination_id)
        .await
        .map_err(ApiError::read)?
        .ok_or(ApiError::NotFound("Destination"))?;

    log::info!("🗑️  Destination {} deleted", destination_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Destination deleted")))
}
