use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use super::DBClient;
use crate::{
    dtos::propertydtos::{CreatePropertyDto, PropertyQueryDto, UpdatePropertyDto},
    models::propertymodel::Property,
};

#[async_trait]
pub trait PropertyExt {
    async fn create_property(
        &self,
        owner_id: Uuid,
        property_data: CreatePropertyDto,
    ) -> Result<Property, sqlx::Error>;

    /// Includes soft-deleted rows; callers decide how to treat them.
    async fn get_property_by_id(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error>;

    async fn get_available_properties(
        &self,
        filters: &PropertyQueryDto,
    ) -> Result<Vec<Property>, sqlx::Error>;

    async fn get_properties_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, sqlx::Error>;

    async fn update_property(
        &self,
        property_id: Uuid,
        changes: UpdatePropertyDto,
    ) -> Result<Property, sqlx::Error>;

    async fn soft_delete_property(&self, property_id: Uuid) -> Result<Property, sqlx::Error>;
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn create_property(
        &self,
        owner_id: Uuid,
        property_data: CreatePropertyDto,
    ) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description, property_type, address, city, state, country,
                bedrooms, bathrooms, amenities, images, monthly_rent
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13
            )
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(property_data.title)
        .bind(property_data.description)
        .bind(property_data.property_type)
        .bind(property_data.address)
        .bind(property_data.city)
        .bind(property_data.state)
        .bind(property_data.country)
        .bind(property_data.bedrooms)
        .bind(property_data.bathrooms)
        .bind(Json(property_data.amenities.unwrap_or_default()))
        .bind(Json(property_data.images.unwrap_or_default()))
        .bind(property_data.monthly_rent)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_property_by_id(&self, property_id: Uuid) -> Result<Option<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_available_properties(
        &self,
        filters: &PropertyQueryDto,
    ) -> Result<Vec<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            SELECT * FROM properties
            WHERE is_deleted = FALSE
              AND is_available = TRUE
              AND ($1::text IS NULL OR LOWER(city) = LOWER($1))
              AND ($2::bigint IS NULL OR monthly_rent >= $2)
              AND ($3::bigint IS NULL OR monthly_rent <= $3)
              AND ($4::int IS NULL OR bedrooms >= $4)
              AND ($5::property_type IS NULL OR property_type = $5)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filters.city.as_deref())
        .bind(filters.min_rent)
        .bind(filters.max_rent)
        .bind(filters.bedrooms)
        .bind(filters.property_type)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_properties_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            SELECT * FROM properties
            WHERE owner_id = $1 AND is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_property(
        &self,
        property_id: Uuid,
        changes: UpdatePropertyDto,
    ) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                property_type = COALESCE($4, property_type),
                address = COALESCE($5, address),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                country = COALESCE($8, country),
                bedrooms = COALESCE($9, bedrooms),
                bathrooms = COALESCE($10, bathrooms),
                amenities = COALESCE($11, amenities),
                images = COALESCE($12, images),
                monthly_rent = COALESCE($13, monthly_rent),
                is_available = COALESCE($14, is_available),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(property_id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.property_type)
        .bind(changes.address)
        .bind(changes.city)
        .bind(changes.state)
        .bind(changes.country)
        .bind(changes.bedrooms)
        .bind(changes.bathrooms)
        .bind(changes.amenities.map(Json))
        .bind(changes.images.map(Json))
        .bind(changes.monthly_rent)
        .bind(changes.is_available)
        .fetch_one(&self.pool)
        .await
    }

    async fn soft_delete_property(&self, property_id: Uuid) -> Result<Property, sqlx::Error> {
        sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
            SET is_deleted = TRUE, is_available = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(property_id)
        .fetch_one(&self.pool)
        .await
    }
}
