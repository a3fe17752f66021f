//! Document store access.
//!
//! Handlers only see [`TravelStore`]; the MongoDB implementation lives in
//! [`mongo`], and tests run against the in-memory store.

#[cfg(test)]
pub mod memory;
pub mod mongo;

pub use mongo::MongoStore;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::{Destination, DestinationPatch, Trip, TripPatch, User, UserPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("`{0}` is not a valid ObjectId")]
    InvalidId(String),

    #[error("inserted document did not receive an ObjectId")]
    MissingInsertedId,

    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Parses an identifier taken from a request path.
pub fn parse_id(raw: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| StoreError::InvalidId(raw.to_string()))
}

/// Everything the HTTP layer needs from the document store.
///
/// `update_*` and `delete_*` return `None` when no document has the given id;
/// updates return the document as it is after the change.
#[async_trait]
pub trait TravelStore: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn find_user(&self, id: ObjectId) -> StoreResult<Option<User>>;
    async fn insert_user(&self, user: User) -> StoreResult<User>;
    async fn update_user(&self, id: ObjectId, patch: &UserPatch) -> StoreResult<Option<User>>;
    async fn delete_user(&self, id: ObjectId) -> StoreResult<Option<User>>;

    async fn list_destinations(&self) -> StoreResult<Vec<Destination>>;
    async fn find_destination(&self, id: ObjectId) -> StoreResult<Option<Destination>>;
    /// Destinations whose id is in `ids`; unknown ids are skipped.
    async fn find_destinations_by_ids(&self, ids: &[ObjectId]) -> StoreResult<Vec<Destination>>;
    async fn insert_destination(&self, destination: Destination) -> StoreResult<Destination>;
    async fn update_destination(
        &self,
        id: ObjectId,
        patch: &DestinationPatch,
    ) -> StoreResult<Option<Destination>>;
    async fn delete_destination(&self, id: ObjectId) -> StoreResult<Option<Destination>>;

    /// Trips of one user ordered by `_id`, i.e. insertion order. A `limit` of 0 means no limit.
    async fn find_trips_by_user(
        &self,
        user_id: ObjectId,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<Trip>>;
    async fn count_trips_by_user(&self, user_id: ObjectId) -> StoreResult<u64>;
    async fn find_trip(&self, id: ObjectId) -> StoreResult<Option<Trip>>;
    async fn insert_trip(&self, trip: Trip) -> StoreResult<Trip>;
    async fn update_trip(&self, id: ObjectId, patch: &TripPatch) -> StoreResult<Option<Trip>>;
    async fn delete_trip(&self, id: ObjectId) -> StoreResult<Option<Trip>>;

    /// Removes every user, destination and trip.
    async fn clear_all(&self) -> StoreResult<()>;
}
