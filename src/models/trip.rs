use std::fmt;
use std::str::FromStr;

use mongodb::bson::{self, doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::destination::DestinationResponse;
use super::validation::{format_date, parse_date, parse_object_id, present, ValidationError};

pub const TRIPS_COLLECTION: &str = "trips";

const ENTITY: &str = "Trip";

/// Trip status. There are no transition rules: any value may replace any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Planned,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Planned => "planned",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(TripStatus::Planned),
            "completed" => Ok(TripStatus::Completed),
            "cancelled" => Ok(TripStatus::Cancelled),
            other => Err(ValidationError::field(
                ENTITY,
                "status",
                format!("`{}` is not one of planned, completed, cancelled", other),
            )),
        }
    }
}

/// Trip (stored in MongoDB). `userId` and `destinationId` are references by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Never checked against the users collection
    pub user_id: ObjectId,

    /// Checked for existence on creation only
    pub destination_id: ObjectId,

    pub start_date: bson::DateTime,

    pub end_date: bson::DateTime,

    #[serde(default)]
    pub status: TripStatus,
}

/// Request to create a trip
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub user_id: Option<String>,
    pub destination_id: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Defaults to `planned`
    pub status: Option<String>,
}

impl CreateTripRequest {
    /// Checks that every reference and date is present and parses the destination id,
    /// which must be resolved before the remaining fields are looked at.
    pub fn into_draft(self) -> Result<TripDraft, ValidationError> {
        let (Some(user_id), Some(destination_id), Some(start_date), Some(end_date)) = (
            present(&self.user_id),
            present(&self.destination_id),
            present(&self.start_date),
            present(&self.end_date),
        ) else {
            return Err(ValidationError::Missing("Missing required fields"));
        };

        Ok(TripDraft {
            destination_id: parse_object_id(ENTITY, "destinationId", destination_id)?,
            user_id: user_id.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            status: present(&self.status).map(str::to_string),
        })
    }
}

/// Create request whose required fields are known to be present
#[derive(Debug, Clone, PartialEq)]
pub struct TripDraft {
    pub destination_id: ObjectId,
    user_id: String,
    start_date: String,
    end_date: String,
    status: Option<String>,
}

impl TripDraft {
    pub fn into_trip(self) -> Result<Trip, ValidationError> {
        let status = match self.status.as_deref() {
            Some(status) => status.parse::<TripStatus>()?,
            None => TripStatus::default(),
        };

        Ok(Trip {
            id: None,
            user_id: parse_object_id(ENTITY, "userId", &self.user_id)?,
            destination_id: self.destination_id,
            start_date: parse_date(ENTITY, "startDate", &self.start_date)?,
            end_date: parse_date(ENTITY, "endDate", &self.end_date)?,
            status,
        })
    }
}

/// Request to update a trip. Every provided field is validated again.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTripRequest {
    pub user_id: Option<String>,
    pub destination_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

impl UpdateTripRequest {
    pub fn into_patch(self) -> Result<TripPatch, ValidationError> {
        Ok(TripPatch {
            user_id: self.user_id.as_deref().map(|v| parse_object_id(ENTITY, "userId", v)).transpose()?,
            destination_id: self
                .destination_id
                .as_deref()
                .map(|v| parse_object_id(ENTITY, "destinationId", v))
                .transpose()?,
            start_date: self.start_date.as_deref().map(|v| parse_date(ENTITY, "startDate", v)).transpose()?,
            end_date: self.end_date.as_deref().map(|v| parse_date(ENTITY, "endDate", v)).transpose()?,
            status: self.status.as_deref().map(str::parse::<TripStatus>).transpose()?,
        })
    }
}

/// Validated partial update of a trip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPatch {
    pub user_id: Option<ObjectId>,
    pub destination_id: Option<ObjectId>,
    pub start_date: Option<bson::DateTime>,
    pub end_date: Option<bson::DateTime>,
    pub status: Option<TripStatus>,
}

impl TripPatch {
    pub fn to_document(&self) -> Document {
        let mut set = doc! {};
        if let Some(user_id) = self.user_id { set.insert("userId", user_id); }
        if let Some(destination_id) = self.destination_id { set.insert("destinationId", destination_id); }
        if let Some(start_date) = self.start_date { set.insert("startDate", start_date); }
        if let Some(end_date) = self.end_date { set.insert("endDate", end_date); }
        if let Some(status) = self.status { set.insert("status", status.as_str()); }
        set
    }
}

/// Trip with its destination left as an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub destination_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: TripStatus,
}

impl From<Trip> for TripResponse {
    fn from(t: Trip) -> Self {
        TripResponse {
            id: t.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: t.user_id.to_hex(),
            destination_id: t.destination_id.to_hex(),
            start_date: format_date(t.start_date),
            end_date: format_date(t.end_date),
            status: t.status,
        }
    }
}

/// Trip with its destination document attached in place of the id.
/// `destinationId` is `null` when the referenced destination no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedTripResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub destination_id: Option<DestinationResponse>,
    pub start_date: String,
    pub end_date: String,
    pub status: TripStatus,
}

impl PopulatedTripResponse {
    pub fn new(trip: Trip, destination: Option<DestinationResponse>) -> Self {
        PopulatedTripResponse {
            id: trip.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: trip.user_id.to_hex(),
            destination_id: destination,
            start_date: format_date(trip.start_date),
            end_date: format_date(trip.end_date),
            status: trip.status,
        }
    }
}

/// One page of a user's trips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedTrips {
    pub trips: Vec<PopulatedTripResponse>,
    pub total_pages: u64,
    pub current_page: u64,
}
