pub mod paymentmodel;
pub mod propertymodel;
pub mod rentalmodel;
pub mod reportmodel;
pub mod usermodel;
pub mod verificationmodel;
