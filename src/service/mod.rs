pub mod error;
pub mod notification_service;
pub mod rental_service;
pub mod trust_service;
