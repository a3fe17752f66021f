use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::database::{parse_id, TravelStore};
use crate::models::{
    CreateTripRequest, ErrorResponse, MessageResponse, PaginatedTrips, PopulatedTripResponse,
    TripResponse, UpdateTripRequest,
};
use crate::services::trip_service::{self, Pagination};
use crate::utils::ApiError;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number, starting at 1 (default 1)
    pub page: Option<u64>,
    /// Trips per page (default 10, 0 for all)
    pub limit: Option<u64>,
}

/// GET /api/user/{user_id}/orders - Paginated trips of a user, destinations attached
#[utoipa::path(
    get,
    path = "/api/user/{user_id}/orders",
    tag = "Trips",
    params(("user_id" = String, Path, description = "User ObjectId"), PaginationQuery),
    responses(
        (status = 200, description = "One page of the user's trips", body = PaginatedTrips),
        (status = 500, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
#[get("/user/{user_id}/orders")]
pub async fn list_user_trips(
    store: web::Data<dyn TravelStore>,
    path: web::Path<String>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path).map_err(ApiError::read)?;
    let pagination = Pagination::new(query.page, query.limit);

    let listing = trip_service::list_user_trips(store.get_ref(), user_id, pagination)
        .await
        .map_err(ApiError::read)?;

    Ok(HttpResponse::Ok().json(listing))
}

/// GET /api/trip/{trip_id} - Trip with its destination attached
#[utoipa::path(
    get,
    path = "/api/trip/{trip_id}",
    tag = "Trips",
    params(("trip_id" = String, Path, description = "Trip ObjectId")),
    responses(
        (status = 200, description = "Trip details", body = PopulatedTripResponse),
        (status = 404, description = "Trip not found", body = MessageResponse),
        (status = 500, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
#[get("/trip/{trip_id}")]
pub async fn get_trip(
    store: web::Data<dyn TravelStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let trip_id = parse_id(&path).map_err(ApiError::read)?;

    let trip = trip_service::find_populated_trip(store.get_ref(), trip_id)
        .await
        .map_err(ApiError::read)?
        .ok_or(ApiError::NotFound("Trip"))?;

    Ok(HttpResponse::Ok().json(trip))
}

/// POST /api/trip - Creates a trip for an existing destination
#[utoipa::path(
    post,
    path = "/api/trip",
    tag = "Trips",
    request_body = CreateTripRequest,
    responses(
        (status = 201, description = "Trip created", body = TripResponse),
        (status = 400, description = "Missing fields, unknown destination or invalid values")
    )
)]
#[post("/trip")]
pub async fn create_trip(
    store: web::Data<dyn TravelStore>,
    body: web::Json<CreateTripRequest>,
) -> Result<HttpResponse, ApiError> {
    let draft = body.into_inner().into_draft()?;

    // The user reference is deliberately not looked up.
    let destination = store
        .find_destination(draft.destination_id)
        .await
        .map_err(ApiError::write)?;
    if destination.is_none() {
        return Err(ApiError::Rejected("Invalid destinationId".to_string()));
    }

    let trip = draft.into_trip()?;
    let created = store.insert_trip(trip).await.map_err(ApiError::write)?;
    log::info!(
        "✈️  Trip {} created for user {}",
        created.id.map(|id| id.to_hex()).unwrap_or_default(),
        created.user_id
    );

    Ok(HttpResponse::Created().json(TripResponse::from(created)))
}

/// PUT /api/trip/{trip_id} - Merges the provided fields into a trip
#[utoipa::path(
    put,
    path = "/api/trip/{trip_id}",
    tag = "Trips",
    params(("trip_id" = String, Path, description = "Trip ObjectId")),
    request_body = UpdateTripRequest,
    responses(
        (status = 200, description = "Trip updated", body = TripResponse),
        (status = 404, description = "Trip not found", body = MessageResponse),
        (status = 400, description = "Invalid values or malformed id", body = ErrorResponse)
    )
)]
#[put("/trip/{trip_id}")]
pub async fn update_trip(
    store: web::Data<dyn TravelStore>,
    path: web::Path<String>,
    body: web::Json<UpdateTripRequest>,
) -> Result<HttpResponse, ApiError> {
    let trip_id = parse_id(&path).map_err(ApiError::write)?;
    let patch = body.into_inner().into_patch()?;

    let updated = store
        .update_trip(trip_id, &patch)
        .await
        .map_err(ApiError::write)?
        .ok_or(ApiError::NotFound("Trip"))?;

    Ok(HttpResponse::Ok().json(TripResponse::from(updated)))
}

/// DELETE /api/trip/{trip_id}
#[utoipa::path(
    delete,
    path = "/api/trip/{trip_id}",
    tag = "Trips",
    params(("trip_id" = String, Path, description = "Trip ObjectId")),
    responses(
        (status = 200, description = "Trip deleted", body = MessageResponse),
        (status = 404, description = "Trip not found", body = MessageResponse),
        (status = 500, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
#[delete("/trip/{trip_id}")]
pub async fn delete_trip(
    store: web::Data<dyn TravelStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let trip_id = parse_id(&path).map_err(ApiError::read)?;

    store
        .delete_trip(trip_id)
        .await
        .map_err(ApiError::read)?
        .ok_or(ApiError::NotFound("Trip"))?;

    log::info!("🗑️  Trip {} deleted", trip_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Trip deleted")))
}
