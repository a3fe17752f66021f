//! Demo fixtures: four users, four destinations and one trip per pair.

use thiserror::Error;

use crate::database::{StoreError, TravelStore};
use crate::models::{parse_date, Destination, Trip, TripStatus, User, ValidationError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("bad fixture: {0}")]
    Fixture(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub destinations: usize,
    pub trips: usize,
}

const USERS: [(&str, &str); 4] = [
    ("Alice Johnson", "alice@example.com"),
    ("Bob Smith", "bob@example.com"),
    ("Carol Davis", "carol@example.com"),
    ("David Lee", "david@example.com"),
];

const DESTINATIONS: [(&str, &str, &str); 4] = [
    ("Paris", "France", "The city of light and love."),
    ("Tokyo", "Japan", "A bustling metropolis blending tradition and technology."),
    ("New York", "USA", "The city that never sleeps."),
    ("Sydney", "Australia", "Beautiful beaches and the iconic Opera House."),
];

/// (start, end, status) for the trip of the n-th user to the n-th destination
const TRIPS: [(&str, &str, TripStatus); 4] = [
    ("2025-06-01", "2025-06-10", TripStatus::Planned),
    ("2025-07-15", "2025-07-25", TripStatus::Completed),
    ("2025-08-05", "2025-08-12", TripStatus::Cancelled),
    ("2025-09-20", "2025-09-30", TripStatus::Planned),
];

/// Wipes users, destinations and trips, then inserts the fixtures.
pub async fn seed_fixtures(store: &dyn TravelStore) -> Result<SeedSummary, SeedError> {
    store.clear_all().await?;
    log::info!("🧹 Existing data cleared");

    let mut users = Vec::with_capacity(USERS.len());
    for (name, email) in USERS {
        let user = User {
            id: None,
            name: Some(name.to_string()),
            email: Some(email.to_string()),
        };
        users.push(store.insert_user(user).await?);
    }
    log::info!("   ✅ {} users seeded", users.len());

    let mut destinations = Vec::with_capacity(DESTINATIONS.len());
    for (city, country, description) in DESTINATIONS {
        let destination = Destination {
            id: None,
            city: city.to_string(),
            country: country.to_string(),
            description: Some(description.to_string()),
        };
        destinations.push(store.insert_destination(destination).await?);
    }
    log::info!("   ✅ {} destinations seeded", destinations.len());

    let mut trips = 0;
    for ((user, destination), (start, end, status)) in users.iter().zip(&destinations).zip(TRIPS) {
        let (Some(user_id), Some(destination_id)) = (user.id, destination.id) else {
            return Err(StoreError::MissingInsertedId.into());
        };

        store
            .insert_trip(Trip {
                id: None,
                user_id,
                destination_id,
                start_date: parse_date("Trip", "startDate", start)?,
                end_date: parse_date("Trip", "endDate", end)?,
                status,
            })
            .await?;
        trips += 1;
    }
    log::info!("   ✅ {} trips seeded", trips);

    Ok(SeedSummary {
        users: users.len(),
        destinations: destinations.len(),
        trips,
    })
}
