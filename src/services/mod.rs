pub mod booking;
pub mod reference;
pub mod scheduling;
