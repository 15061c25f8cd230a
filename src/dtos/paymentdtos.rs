use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::paymentmodel::{Payment, PaymentMethod, PaymentStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePaymentDto {
    #[validate(range(min = 1, message = "Amount must be greater than zero"))]
    pub amount: i64,
    pub method: PaymentMethod,
    pub property_id: Option<Uuid>,
    pub rental_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePaymentStatusDto {
    #[validate(custom = "validate_settled_status")]
    pub status: PaymentStatus,
}

fn validate_settled_status(status: &PaymentStatus) -> Result<(), validator::ValidationError> {
    match status {
        PaymentStatus::Pending => Err(validator::ValidationError::new("invalid_payment_status")),
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterPaymentDto {
    pub id: Uuid,
    pub payer_id: Uuid,
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub property_id: Option<Uuid>,
    pub rental_id: Option<Uuid>,
    pub period: Option<NaiveDate>,
    pub reference: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterPaymentDto {
    pub fn filter_payment(payment: &Payment) -> Self {
        FilterPaymentDto {
            id: payment.id,
            payer_id: payment.payer_id,
            amount: payment.amount,
            method: payment.method,
            status: payment.status,
            property_id: payment.property_id,
            rental_id: payment.rental_id,
            period: payment.period,
            reference: payment.reference.to_owned(),
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }

    pub fn filter_payments(payments: &[Payment]) -> Vec<FilterPaymentDto> {
        payments.iter().map(FilterPaymentDto::filter_payment).collect()
    }
}
