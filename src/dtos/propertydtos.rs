use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::propertymodel::{Property, PropertyType};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePropertyDto {
    #[validate(length(min = 5, max = 200, message = "Title must be between 5 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 10, max = 5000, message = "Description must be between 10 and 5000 characters"))]
    pub description: String,

    pub property_type: PropertyType,

    //Location
    #[validate(length(min = 5, max = 500, message = "Address must be between 5 and 500 characters"))]
    pub address: String,

    #[validate(length(min = 2, max = 100, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 2, max = 100, message = "State is required"))]
    pub state: String,

    #[validate(length(min = 2, max = 100, message = "Country is required"))]
    pub country: String,

    //Specifications
    #[validate(range(min = 0, max = 50, message = "Bedrooms must be between 0 and 50"))]
    pub bedrooms: i32,

    #[validate(range(min = 0, max = 50, message = "Bathrooms must be between 0 and 50"))]
    pub bathrooms: i32,

    #[validate(range(min = 1, message = "Monthly rent must be greater than zero"))]
    pub monthly_rent: i64,

    pub amenities: Option<Vec<String>>,

    //Photos (URLs after uploads)
    pub images: Option<Vec<String>>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePropertyDto {
    #[validate(length(min = 5, max = 200, message = "Title must be between 5 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 10, max = 5000, message = "Description must be between 10 and 5000 characters"))]
    pub description: Option<String>,

    pub property_type: Option<PropertyType>,

    #[validate(length(min = 5, max = 500, message = "Address must be between 5 and 500 characters"))]
    pub address: Option<String>,

    #[validate(length(min = 2, max = 100, message = "City cannot be empty"))]
    pub city: Option<String>,

    #[validate(length(min = 2, max = 100, message = "State cannot be empty"))]
    pub state: Option<String>,

    #[validate(length(min = 2, max = 100, message = "Country cannot be empty"))]
    pub country: Option<String>,

    #[validate(range(min = 0, max = 50, message = "Bedrooms must be between 0 and 50"))]
    pub bedrooms: Option<i32>,

    #[validate(range(min = 0, max = 50, message = "Bathrooms must be between 0 and 50"))]
    pub bathrooms: Option<i32>,

    #[validate(range(min = 1, message = "Monthly rent must be greater than zero"))]
    pub monthly_rent: Option<i64>,

    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PropertyQueryDto {
    pub city: Option<String>,
    #[validate(range(min = 0))]
    pub min_rent: Option<i64>,
    #[validate(range(min = 0))]
    pub max_rent: Option<i64>,
    #[validate(range(min = 0, max = 50))]
    pub bedrooms: Option<i32>,
    pub property_type: Option<PropertyType>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterPropertyDto {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub monthly_rent: i64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub is_available: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterPropertyDto {
    pub fn filter_property(property: &Property) -> Self {
        Self {
            id: property.id,
            owner_id: property.owner_id,
            title: property.title.clone(),
            description: property.description.clone(),
            property_type: property.property_type,
            address: property.address.clone(),
            city: property.city.clone(),
            state: property.state.clone(),
            country: property.country.clone(),
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            monthly_rent: property.monthly_rent,
            amenities: property.amenities.0.clone(),
            images: property.images.0.clone(),
            is_available: property.is_available,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }

    pub fn filter_properties(properties: &[Property]) -> Vec<FilterPropertyDto> {
        properties.iter().map(FilterPropertyDto::filter_property).collect()
    }
}
