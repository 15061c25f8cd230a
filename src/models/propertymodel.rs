use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "property_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Room,
    Studio,
    Condo,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,

    pub title: String,
    pub description: String,
    pub property_type: PropertyType,

    // Location
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,

    // Specifications
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub amenities: Json<Vec<String>>,
    pub images: Json<Vec<String>>,

    /// Minor currency units.
    pub monthly_rent: i64,

    pub is_available: bool,
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}
