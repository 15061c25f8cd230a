use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "rental_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "rental_payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RentalPaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    Unpaid,
    Paid,
}

/// One month of the schedule embedded in a rental.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MonthlyPayment {
    pub due_date: NaiveDate,
    pub amount: i64,
    pub status: InstallmentStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Rental {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: i64,
    pub status: RentalStatus,
    pub payment_status: RentalPaymentStatus,
    pub payment_schedule: Json<Vec<MonthlyPayment>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
