pub mod destinations;
pub mod health;
pub mod swagger;
pub mod trips;
pub mod users;

use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{web, HttpResponse};
use serde_json::json;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::models::MessageResponse;
use crate::utils::ApiError;

pub const UNHANDLED_ERROR_MESSAGE: &str = "Something went wrong on the server.";

/// Registers every route. The store must already be in app data as
/// `web::Data<dyn TravelStore>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/", web::get().to(health::index))
        .route("/health", web::get().to(health::health_check))
        .route("/api-docs", web::get().to(docs_redirect))
        .service(
            SwaggerUi::new("/api-docs/{_:.*}")
                .url("/api-docs/openapi.json", swagger::ApiDoc::openapi()),
        )
        .service(
            web::scope("/api")
                // Trips
                .service(trips::list_user_trips)
                .service(trips::get_trip)
                .service(trips::create_trip)
                .service(trips::update_trip)
                .service(trips::delete_trip)
                // Destinations
                .service(destinations::list_destinations)
                .service(destinations::get_destination)
                .service(destinations::create_destination)
                .service(destinations::update_destination)
                .service(destinations::delete_destination)
                // Users
                .service(users::list_users)
                .service(users::get_user)
                .service(users::create_user)
                .service(users::update_user)
                .service(users::delete_user),
        );
}

/// Malformed JSON bodies become 400 `{error}`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| ApiError::Invalid(err.to_string()).into())
}

/// Malformed query strings become 400 `{error}`.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| ApiError::Invalid(err.to_string()).into())
}

async fn docs_redirect() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/api-docs/"))
        .finish()
}

/// Default service for paths no route matches.
pub async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse::new("Route not found"))
}

/// Catch-all for server errors: any 5xx without a JSON body is replaced by a
/// generic `{error}` body. Responses already rendered by handlers pass through.
pub fn render_unhandled<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let has_json_body = res
        .headers()
        .get(header::CONTENT_TYPE)
        .map_or(false, |value| value.as_bytes().starts_with(b"application/json"));

    if has_json_body {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    log::error!(
        "💥 Unhandled error on {} {}: {}",
        res.request().method(),
        res.request().path(),
        res.status()
    );

    let (req, _) = res.into_parts();
    let response = HttpResponse::InternalServerError().json(json!({ "error": UNHANDLED_ERROR_MESSAGE }));

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use actix_web::body::MessageBody;
    use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::middleware::ErrorHandlers;
    use actix_web::{web, App};

    use crate::database::memory::MemoryStore;
    use crate::database::TravelStore;

    /// The production route table over an in-memory store.
    pub fn test_app(
        store: Arc<MemoryStore>,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let store: Arc<dyn TravelStore> = store;
        App::new()
            .app_data(web::Data::from(store))
            .wrap(ErrorHandlers::new().default_handler_server(super::render_unhandled))
            .configure(super::configure)
            .default_service(web::to(super::route_not_found))
    }
}
