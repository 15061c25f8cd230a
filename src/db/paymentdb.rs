use async_trait::async_trait;
use uuid::Uuid;

use super::DBClient;
use crate::models::paymentmodel::{Payment, PaymentMethod, PaymentStatus};

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub payer_id: Uuid,
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub property_id: Option<Uuid>,
    pub rental_id: Option<Uuid>,
    pub reference: String,
}

#[async_trait]
pub trait PaymentExt {
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment, sqlx::Error>;

    async fn get_payment_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, sqlx::Error>;

    async fn get_payments_by_payer(&self, payer_id: Uuid) -> Result<Vec<Payment>, sqlx::Error>;

    async fn update_payment_status(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Payment, sqlx::Error>;
}

#[async_trait]
impl PaymentExt for DBClient {
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (payer_id, amount, method, status, property_id, rental_id, reference)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payment.payer_id)
        .bind(payment.amount)
        .bind(payment.method)
        .bind(payment.status)
        .bind(payment.property_id)
        .bind(payment.rental_id)
        .bind(payment.reference)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_payment_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(payment_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_payments_by_payer(&self, payer_id: Uuid) -> Result<Vec<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE payer_id = $1 ORDER BY created_at DESC",
        )
        .bind(payer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_payment_status(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(
            "UPDATE payments SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(payment_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }
}
