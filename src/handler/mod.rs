pub mod payments;
pub mod properties;
pub mod rentals;
pub mod reports;
pub mod users;
