pub mod booking;
pub mod gateway;

pub use booking::{BookingError, BookingService, Session};
pub use gateway::{PaymentGateway, StripeGateway};
