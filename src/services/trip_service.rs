use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;

use crate::database::{StoreResult, TravelStore};
use crate::models::{DestinationResponse, PaginatedTrips, PopulatedTripResponse, Trip};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Page window for the per-user trip listing. No upper bound is placed on `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    /// 0 means no limit
    pub limit: u64,
}

impl Pagination {
    /// Page numbers start at 1; 0 is read as the first page.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Pagination {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, count: u64) -> u64 {
        if self.limit == 0 {
            u64::from(count > 0)
        } else {
            count.div_ceil(self.limit)
        }
    }
}

/// Attaches each trip's destination document in place of its id.
///
/// Destinations are fetched in one query for the distinct ids of `trips`.
/// A trip whose destination no longer exists is returned with no destination.
pub async fn populate_destinations(
    store: &dyn TravelStore,
    trips: Vec<Trip>,
) -> StoreResult<Vec<PopulatedTripResponse>> {
    let mut ids: Vec<ObjectId> = trips.iter().map(|t| t.destination_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let destinations: HashMap<ObjectId, DestinationResponse> = store
        .find_destinations_by_ids(&ids)
        .await?
        .into_iter()
        .filter_map(|d| d.id.map(|id| (id, DestinationResponse::from(d))))
        .collect();

    Ok(trips
        .into_iter()
        .map(|trip| {
            let destination = destinations.get(&trip.destination_id).cloned();
            if destination.is_none() {
                log::warn!(
                    "⚠️  Trip {:?} references missing destination {}",
                    trip.id,
                    trip.destination_id
                );
            }
            PopulatedTripResponse::new(trip, destination)
        })
        .collect())
}

/// Fetches one trip with its destination attached.
pub async fn find_populated_trip(
    store: &dyn TravelStore,
    trip_id: ObjectId,
) -> StoreResult<Option<PopulatedTripResponse>> {
    let Some(trip) = store.find_trip(trip_id).await? else {
        return Ok(None);
    };
    Ok(populate_destinations(store, vec![trip]).await?.pop())
}

/// One page of a user's trips with destinations attached, plus the page count.
pub async fn list_user_trips(
    store: &dyn TravelStore,
    user_id: ObjectId,
    pagination: Pagination,
) -> StoreResult<PaginatedTrips> {
    let trips = store
        .find_trips_by_user(user_id, pagination.skip(), pagination.limit)
        .await?;
    let count = store.count_trips_by_user(user_id).await?;

    Ok(PaginatedTrips {
        trips: populate_destinations(store, trips).await?,
        total_pages: pagination.total_pages(count),
        current_page: pagination.page,
    })
}
