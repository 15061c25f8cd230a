use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    paymentmodel::PaymentMethod,
    rentalmodel::{MonthlyPayment, Rental, RentalPaymentStatus, RentalStatus},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRentalDto {
    pub property_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PayRentDto {
    /// `YYYY-MM`
    #[validate(length(equal = 7, message = "Month must be formatted as YYYY-MM"))]
    pub month: String,
    pub method: PaymentMethod,
}


#[derive(Debug, Serialize, Deserialize)]
pub struct FilterRentalDto {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: i64,
    pub status: RentalStatus,
    pub payment_status: RentalPaymentStatus,
    pub payment_schedule: Vec<MonthlyPayment>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterRentalDto {
    pub fn filter_rental(rental: &Rental) -> Self {
        FilterRentalDto {
            id: rental.id,
            tenant_id: rental.tenant_id,
            property_id: rental.property_id,
            start_date: rental.start_date,
            end_date: rental.end_date,
            monthly_rent: rental.monthly_rent,
            status: rental.status,
            payment_status: rental.payment_status,
            payment_schedule: rental.payment_schedule.0.clone(),
            created_at: rental.created_at,
            updated_at: rental.updated_at,
        }
    }

    pub fn filter_rentals(rentals: &[Rental]) -> Vec<FilterRentalDto> {
        rentals.iter().map(FilterRentalDto::filter_rental).collect()
    }
}
