pub mod auth;
pub mod bookings;
pub mod navigate;
pub mod search;
pub mod server;
pub mod uploads;
pub mod venues;
