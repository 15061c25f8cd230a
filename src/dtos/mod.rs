pub mod paymentdtos;
pub mod propertydtos;
pub mod rentaldtos;
pub mod reportdtos;
pub mod userdtos;
pub mod verificationdtos;
