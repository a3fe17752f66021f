use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{present, ValidationError};

pub const DESTINATIONS_COLLECTION: &str = "destinations";

/// Travel destination (stored in MongoDB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub country: String,

    /// Free text shown alongside the destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request to create a destination
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateDestinationRequest {
    pub city: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
}

impl CreateDestinationRequest {
    pub fn into_destination(self) -> Result<Destination, ValidationError> {
        let (Some(city), Some(country)) = (present(&self.city), present(&self.country)) else {
            return Err(ValidationError::Missing("Missing city or country"));
        };

        Ok(Destination {
            id: None,
            city: city.to_string(),
            country: country.to_string(),
            description: self.description,
        })
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct DestinationPatch {
    pub city: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
}

impl DestinationPatch {
    /// `$set` body for the store
    pub fn to_document(&self) -> Document {
        let mut set = doc! {};
        if let Some(city) = &self.city { set.insert("city", city); }
        if let Some(country) = &self.country { set.insert("country", country); }
        if let Some(description) = &self.description { set.insert("description", description); }
        set
    }
}

/// Destination as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DestinationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub city: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Destination> for DestinationResponse {
    fn from(d: Destination) -> Self {
        DestinationResponse {
            id: d.id.map(|id| id.to_hex()).unwrap_or_default(),
            city: d.city,
            country: d.country,
            description: d.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("France"))]
    #[case(Some("Paris"), None)]
    #[case(Some(""), Some("France"))]
    fn city_and_country_are_required(#[case] city: Option<&str>, #[case] country: Option<&str>) {
        let request = CreateDestinationRequest {
            city: city.map(String::from),
            country: country.map(String::from),
            description: None,
        };

        assert_eq!(
            request.into_destination(),
            Err(ValidationError::Missing("Missing city or country"))
        );
    }

    #[test]
    fn patch_only_sets_provided_fields() {
        let patch = DestinationPatch {
            description: Some("Croissants".into()),
            ..Default::default()
        };
        assert_eq!(patch.to_document(), doc! { "description": "Croissants" });
        assert!(DestinationPatch::default().to_document().is_empty());
    }
}
