use std::time::Duration;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{StoreError, StoreResult, TravelStore};
use crate::models::{
    Destination, DestinationPatch, Trip, TripPatch, User, UserPatch, DESTINATIONS_COLLECTION,
    TRIPS_COLLECTION, USERS_COLLECTION,
};

/// MongoDB-backed store. Cloning is cheap; clones share the driver's pool.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Builds the client without touching the network. The database named in
    /// the URI wins over `fallback_database`.
    pub async fn connect(uri: &str, fallback_database: &str) -> StoreResult<Self> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| fallback_database.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        log::info!("📊 MongoDB database: {}", db_name);

        Ok(Self { client, db })
    }

    /// Creates the index that serves the per-user trip listing and its sort.
    pub async fn ensure_indexes(&self) {
        let trips = self.collection::<Document>(TRIPS_COLLECTION);
        let index = IndexModel::builder().keys(doc! { "userId": 1, "_id": 1 }).build();

        match trips.create_index(index).await {
            Ok(_) => log::info!("   ✅ Index ready: trips(userId, _id)"),
            Err(e) => log::warn!("   ⚠️  Could not create index trips(userId, _id): {}", e),
        }
    }

    /// Closes the driver's connections. Call after the server has stopped.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    async fn find_all<T>(&self, name: &str, filter: Document) -> StoreResult<Vec<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        let cursor = self.collection::<T>(name).find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id<T>(&self, name: &str, id: ObjectId) -> StoreResult<Option<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        Ok(self.collection::<T>(name).find_one(doc! { "_id": id }).await?)
    }

    async fn insert<T>(&self, name: &str, document: &T) -> StoreResult<ObjectId>
    where
        T: Serialize + Send + Sync,
    {
        let result = self.collection::<T>(name).insert_one(document).await?;
        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            _ => Err(StoreError::MissingInsertedId),
        }
    }

    async fn update_by_id<T>(&self, name: &str, id: ObjectId, set: Document) -> StoreResult<Option<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        // An empty `$set` is rejected by the server; nothing to change means a plain read.
        if set.is_empty() {
            return self.find_by_id(name, id).await;
        }

        Ok(self
            .collection::<T>(name)
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_by_id<T>(&self, name: &str, id: ObjectId) -> StoreResult<Option<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        Ok(self
            .collection::<T>(name)
            .find_one_and_delete(doc! { "_id": id })
            .await?)
    }
}

#[async_trait]
impl TravelStore for MongoStore {
    async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.find_all(USERS_COLLECTION, doc! {}).await
    }

    async fn find_user(&self, id: ObjectId) -> StoreResult<Option<User>> {
        self.find_by_id(USERS_COLLECTION, id).await
    }

    async fn insert_user(&self, mut user: User) -> StoreResult<User> {
        user.id = Some(self.insert(USERS_COLLECTION, &user).await?);
        Ok(user)
    }

    async fn update_user(&self, id: ObjectId, patch: &UserPatch) -> StoreResult<Option<User>> {
        self.update_by_id(USERS_COLLECTION, id, patch.to_document()).await
    }

    async fn delete_user(&self, id: ObjectId) -> StoreResult<Option<User>> {
        self.delete_by_id(USERS_COLLECTION, id).await
    }

    async fn list_destinations(&self) -> StoreResult<Vec<Destination>> {
        self.find_all(DESTINATIONS_COLLECTION, doc! {}).await
    }

    async fn find_destination(&self, id: ObjectId) -> StoreResult<Option<Destination>> {
        self.find_by_id(DESTINATIONS_COLLECTION, id).await
    }

    async fn find_destinations_by_ids(&self, ids: &[ObjectId]) -> StoreResult<Vec<Destination>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_all(DESTINATIONS_COLLECTION, doc! { "_id": { "$in": ids.to_vec() } })
            .await
    }

    async fn insert_destination(&self, mut destination: Destination) -> StoreResult<Destination> {
        destination.id = Some(self.insert(DESTINATIONS_COLLECTION, &destination).await?);
        Ok(destination)
    }

    async fn update_destination(
        &self,
        id: ObjectId,
        patch: &DestinationPatch,
    ) -> StoreResult<Option<Destination>> {
        self.update_by_id(DESTINATIONS_COLLECTION, id, patch.to_document()).await
    }

    async fn delete_destination(&self, id: ObjectId) -> StoreResult<Option<Destination>> {
        self.delete_by_id(DESTINATIONS_COLLECTION, id).await
    }

    async fn find_trips_by_user(
        &self,
        user_id: ObjectId,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<Trip>> {
        let cursor = self
            .collection::<Trip>(TRIPS_COLLECTION)
            .find(doc! { "userId": user_id })
            .sort(doc! { "_id": 1 })
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_trips_by_user(&self, user_id: ObjectId) -> StoreResult<u64> {
        Ok(self
            .collection::<Trip>(TRIPS_COLLECTION)
            .count_documents(doc! { "userId": user_id })
            .await?)
    }

    async fn find_trip(&self, id: ObjectId) -> StoreResult<Option<Trip>> {
        self.find_by_id(TRIPS_COLLECTION, id).await
    }

    async fn insert_trip(&self, mut trip: Trip) -> StoreResult<Trip> {
        trip.id = Some(self.insert(TRIPS_COLLECTION, &trip).await?);
        Ok(trip)
    }

    async fn update_trip(&self, id: ObjectId, patch: &TripPatch) -> StoreResult<Option<Trip>> {
        self.update_by_id(TRIPS_COLLECTION, id, patch.to_document()).await
    }

    async fn delete_trip(&self, id: ObjectId) -> StoreResult<Option<Trip>> {
        self.delete_by_id(TRIPS_COLLECTION, id).await
    }

    async fn clear_all(&self) -> StoreResult<()> {
        for name in [USERS_COLLECTION, DESTINATIONS_COLLECTION, TRIPS_COLLECTION] {
            self.collection::<Document>(name).delete_many(doc! {}).await?;
        }
        Ok(())
    }
}
