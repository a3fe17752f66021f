use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::database::{parse_id, TravelStore};
use crate::models::{CreateUserRequest, ErrorResponse, MessageResponse, User, UserPatch, UserResponse};
use crate::utils::ApiError;

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[get("/users")]
pub async fn list_users(store: web::Data<dyn TravelStore>) -> Result<HttpResponse, ApiError> {
    let users: Vec<UserResponse> = store
        .list_users()
        .await
        .map_err(ApiError::read)?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 500, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    store: web::Data<dyn TravelStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path).map_err(ApiError::read)?;

    let user = store
        .find_user(user_id)
        .await
        .map_err(ApiError::read)?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Store failure", body = ErrorResponse)
    )
)]
#[post("/users")]
pub async fn create_user(
    store: web::Data<dyn TravelStore>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let created = store
        .insert_user(User::from(body.into_inner()))
        .await
        .map_err(ApiError::write)?;

    Ok(HttpResponse::Created().json(UserResponse::from(created)))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "User ObjectId")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 400, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
#[put("/users/{user_id}")]
pub async fn update_user(
    store: web::Data<dyn TravelStore>,
    path: web::Path<String>,
    body: web::Json<UserPatch>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path).map_err(ApiError::write)?;

    let updated = store
        .update_user(user_id, &body)
        .await
        .map_err(ApiError::write)?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// DELETE /api/users/{user_id} - The user's trips are not touched
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 500, description = "Store failure or malformed id", body = ErrorResponse)
    )
)]
#[delete("/users/{user_id}")]
pub async fn delete_user(
    store: web::Data<dyn TravelStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path).map_err(ApiError::read)?;

    store
        .delete_user(user_id)
        .await
        .map_err(ApiError::read)?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted")))
}
