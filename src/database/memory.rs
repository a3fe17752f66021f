//! In-memory [`TravelStore`] used by handler tests.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{StoreResult, TravelStore};
use crate::models::{Destination, DestinationPatch, Trip, TripPatch, User, UserPatch};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    destinations: RwLock<Vec<Destination>>,
    trips: RwLock<Vec<Trip>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Field-wise equivalents of the `$set` documents the Mongo store sends.

fn merge_user(user: &mut User, patch: &UserPatch) {
    if let Some(name) = &patch.name { user.name = Some(name.clone()); }
    if let Some(email) = &patch.email { user.email = Some(email.clone()); }
}

fn merge_destination(destination: &mut Destination, patch: &DestinationPatch) {
    if let Some(city) = &patch.city { destination.city = city.clone(); }
    if let Some(country) = &patch.country { destination.country = country.clone(); }
    if let Some(description) = &patch.description {
        destination.description = Some(description.clone());
    }
}

fn merge_trip(trip: &mut Trip, patch: &TripPatch) {
    if let Some(user_id) = patch.user_id { trip.user_id = user_id; }
    if let Some(destination_id) = patch.destination_id { trip.destination_id = destination_id; }
    if let Some(start_date) = patch.start_date { trip.start_date = start_date; }
    if let Some(end_date) = patch.end_date { trip.end_date = end_date; }
    if let Some(status) = patch.status { trip.status = status; }
}

#[async_trait]
impl TravelStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_user(&self, id: ObjectId) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == Some(id)).cloned())
    }

    async fn insert_user(&self, mut user: User) -> StoreResult<User> {
        user.id.get_or_insert_with(ObjectId::new);
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: ObjectId, patch: &UserPatch) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == Some(id)).map(|user| {
            merge_user(user, patch);
            user.clone()
        }))
    }

    async fn delete_user(&self, id: ObjectId) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users
            .iter()
            .position(|u| u.id == Some(id))
            .map(|index| users.remove(index)))
    }

    async fn list_destinations(&self) -> StoreResult<Vec<Destination>> {
        Ok(self.destinations.read().await.clone())
    }

    async fn find_destination(&self, id: ObjectId) -> StoreResult<Option<Destination>> {
        Ok(self
            .destinations
            .read()
            .await
            .iter()
            .find(|d| d.id == Some(id))
            .cloned())
    }

    async fn find_destinations_by_ids(&self, ids: &[ObjectId]) -> StoreResult<Vec<Destination>> {
        Ok(self
            .destinations
            .read()
            .await
            .iter()
            .filter(|d| d.id.is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn insert_destination(&self, mut destination: Destination) -> StoreResult<Destination> {
        destination.id.get_or_insert_with(ObjectId::new);
        self.destinations.write().await.push(destination.clone());
        Ok(destination)
    }

    async fn update_destination(
        &self,
        id: ObjectId,
        patch: &DestinationPatch,
    ) -> StoreResult<Option<Destination>> {
        let mut destinations = self.destinations.write().await;
        Ok(destinations.iter_mut().find(|d| d.id == Some(id)).map(|destination| {
            merge_destination(destination, patch);
            destination.clone()
        }))
    }

    async fn delete_destination(&self, id: ObjectId) -> StoreResult<Option<Destination>> {
        let mut destinations = self.destinations.write().await;
        Ok(destinations
            .iter()
            .position(|d| d.id == Some(id))
            .map(|index| destinations.remove(index)))
    }

    async fn find_trips_by_user(
        &self,
        user_id: ObjectId,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<Trip>> {
        let take = if limit == 0 { usize::MAX } else { usize::try_from(limit).unwrap_or(usize::MAX) };
        Ok(self
            .trips
            .read()
            .await
            .iter()
            .filter(|t| t.user_id == user_id)
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(take)
            .cloned()
            .collect())
    }

    async fn count_trips_by_user(&self, user_id: ObjectId) -> StoreResult<u64> {
        let trips = self.trips.read().await;
        Ok(trips.iter().filter(|t| t.user_id == user_id).count() as u64)
    }

    async fn find_trip(&self, id: ObjectId) -> StoreResult<Option<Trip>> {
        Ok(self.trips.read().await.iter().find(|t| t.id == Some(id)).cloned())
    }

    async fn insert_trip(&self, mut trip: Trip) -> StoreResult<Trip> {
        trip.id.get_or_insert_with(ObjectId::new);
        self.trips.write().await.push(trip.clone());
        Ok(trip)
    }

    async fn update_trip(&self, id: ObjectId, patch: &TripPatch) -> StoreResult<Option<Trip>> {
        let mut trips = self.trips.write().await;
        Ok(trips.iter_mut().find(|t| t.id == Some(id)).map(|trip| {
            merge_trip(trip, patch);
            trip.clone()
        }))
    }

    async fn delete_trip(&self, id: ObjectId) -> StoreResult<Option<Trip>> {
        let mut trips = self.trips.write().await;
        Ok(trips
            .iter()
            .position(|t| t.id == Some(id))
            .map(|index| trips.remove(index)))
    }

    async fn clear_all(&self) -> StoreResult<()> {
        self.users.write().await.clear();
        self.destinations.write().await.clear();
        self.trips.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TripStatus;
    use mongodb::bson::DateTime;

    #[tokio::test]
    async fn updates_merge_only_provided_fields() {
        let store = MemoryStore::new();
        let paris = store
            .insert_destination(Destination {
                id: None,
                city: "Paris".into(),
                country: "France".into(),
                description: None,
            })
            .await
            .unwrap();
        let id = paris.id.unwrap();

        let patch = DestinationPatch { description: Some("Croissants".into()), ..Default::default() };
        let updated = store.update_destination(id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.city, "Paris");
        assert_eq!(updated.country, "France");
        assert_eq!(updated.description.as_deref(), Some("Croissants"));

        let trip = store
            .insert_trip(Trip {
                id: None,
                user_id: ObjectId::new(),
                destination_id: id,
                start_date: DateTime::from_millis(0),
                end_date: DateTime::from_millis(86_400_000),
                status: TripStatus::Planned,
            })
            .await
            .unwrap();
        let patch = TripPatch { status: Some(TripStatus::Cancelled), ..Default::default() };
        let updated = store.update_trip(trip.id.unwrap(), &patch).await.unwrap().unwrap();
        assert_eq!(updated, Trip { status: TripStatus::Cancelled, ..trip });

        let missing = store.update_user(ObjectId::new(), &UserPatch::default()).await.unwrap();
        assert!(missing.is_none());
    }
}
