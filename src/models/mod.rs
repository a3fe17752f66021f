pub mod destination;
pub mod trip;
pub mod user;
pub mod validation;

pub use destination::*;
pub use trip::*;
pub use user::*;
pub use validation::*;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{ "message": ... }` body used for confirmations, not-found and rejected input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse { message: message.into() }
    }
}

/// `{ "error": ... }` body used for validation and store failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
