use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::{error::HttpError, models::rentalmodel::RentalStatus};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Property {0} not found")]
    PropertyNotFound(Uuid),

    #[error("Rental {0} not found")]
    RentalNotFound(Uuid),

    #[error("Payment {0} not found")]
    PaymentNotFound(Uuid),

    #[error("No payment is scheduled for {0}")]
    InstallmentNotFound(String),

    #[error("The installment due on {0} has already been paid")]
    InstallmentAlreadyPaid(NaiveDate),

    #[error("Rental {0} is {1:?} and cannot be changed this way")]
    InvalidRentalStatus(Uuid, RentalStatus),

    #[error("Rental {0} has been paid and can no longer be cancelled")]
    RentalAlreadyPaid(Uuid),

    #[error("Property {0} is not available for rent")]
    PropertyUnavailable(Uuid),

    #[error("User {0} is not authorized to perform this action on rental {1}")]
    UnauthorizedRentalAccess(Uuid, Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::PropertyNotFound(_)
            | ServiceError::RentalNotFound(_)
            | ServiceError::PaymentNotFound(_)
            | ServiceError::InstallmentNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::InstallmentAlreadyPaid(_)
            | ServiceError::InvalidRentalStatus(_, _)
            | ServiceError::RentalAlreadyPaid(_)
            | ServiceError::PropertyUnavailable(_)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::UnauthorizedRentalAccess(_, _) => StatusCode::FORBIDDEN,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        HttpError::new(error.to_string(), error.status_code())
    }
}
