use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trip Planner API",
        version = "1.0.0",
        description = "CRUD API for users, destinations and trips.\n\n**Notes:**\n- Trips reference a user and a destination by id; only the destination is checked on creation\n- Trip reads attach the destination document in place of its id\n- Deletes never cascade",
    ),
    paths(
        // Trips
        crate::api::trips::list_user_trips,
        crate::api::trips::get_trip,
        crate::api::trips::create_trip,
        crate::api::trips::update_trip,
        crate::api::trips::delete_trip,

        // Destinations
        crate::api::destinations::list_destinations,
        crate::api::destinations::get_destination,
        crate::api::destinations::create_destination,
        crate::api::destinations::update_destination,
        crate::api::destinations::delete_destination,

        // Users
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::TripStatus,
            crate::models::CreateTripRequest,
            crate::models::UpdateTripRequest,
            crate::models::TripResponse,
            crate::models::PopulatedTripResponse,
            crate::models::PaginatedTrips,
            crate::models::CreateDestinationRequest,
            crate::models::DestinationPatch,
            crate::models::DestinationResponse,
            crate::models::CreateUserRequest,
            crate::models::UserPatch,
            crate::models::UserResponse,
            crate::models::MessageResponse,
            crate::models::ErrorResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Trips", description = "Trips of a user, with paginated listing and destination population."),
        (name = "Destinations", description = "Travel destinations."),
        (name = "Users", description = "Travellers. Emails are not unique."),
        (name = "Health", description = "Liveness and store connectivity."),
    )
)]
pub struct ApiDoc;
