pub mod auth;
pub mod bookings;
pub mod documents;
pub mod products;
