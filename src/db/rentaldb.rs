use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;
use uuid::Uuid;

use super::DBClient;
use crate::models::rentalmodel::{MonthlyPayment, Rental};

#[async_trait]
pub trait RentalExt {
    async fn create_rental(
        &self,
        tenant_id: Uuid,
        property_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        monthly_rent: i64,
        payment_schedule: Vec<MonthlyPayment>,
    ) -> Result<Rental, sqlx::Error>;

    async fn get_rental_by_id(&self, rental_id: Uuid) -> Result<Option<Rental>, sqlx::Error>;

    /// Pending or active rental of this tenant on this property.
    async fn find_open_rental(
        &self,
        tenant_id: Uuid,
        property_id: Uuid,
    ) -> Result<Option<Rental>, sqlx::Error>;

    async fn get_rentals_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<Rental>, sqlx::Error>;

    async fn get_rentals_by_owner(&self, owner_id: Uuid) -> Result<Vec<Rental>, sqlx::Error>;

    async fn has_active_rental(&self, property_id: Uuid) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl RentalExt for DBClient {
    async fn create_rental(
        &self,
        tenant_id: Uuid,
        property_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        monthly_rent: i64,
        payment_schedule: Vec<MonthlyPayment>,
    ) -> Result<Rental, sqlx::Error> {
        sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals (tenant_id, property_id, start_date, end_date, monthly_rent, payment_schedule)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(property_id)
        .bind(start_date)
        .bind(end_date)
        .bind(monthly_rent)
        .bind(Json(payment_schedule))
        .fetch_one(&self.pool)
        .await
    }

    async fn get_rental_by_id(&self, rental_id: Uuid) -> Result<Option<Rental>, sqlx::Error> {
        sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1")
            .bind(rental_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_open_rental(
        &self,
        tenant_id: Uuid,
        property_id: Uuid,
    ) -> Result<Option<Rental>, sqlx::Error> {
        sqlx::query_as::<_, Rental>(
            r#"
            SELECT * FROM rentals
            WHERE tenant_id = $1 AND property_id = $2 AND status IN ('pending', 'active')
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(tenant_id)
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_rentals_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<Rental>, sqlx::Error> {
        sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals WHERE tenant_id = $1 ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_rentals_by_owner(&self, owner_id: Uuid) -> Result<Vec<Rental>, sqlx::Error> {
        sqlx::query_as::<_, Rental>(
            r#"
            SELECT r.* FROM rentals r
            JOIN properties p ON p.id = r.property_id
            WHERE p.owner_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn has_active_rental(&self, property_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM rentals WHERE property_id = $1 AND status = 'active')",
        )
        .bind(property_id)
        .fetch_one(&self.pool)
        .await
    }
}
