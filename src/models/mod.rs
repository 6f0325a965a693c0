pub mod booking;
pub mod request;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use request::{BookingRequest, DurationField};
