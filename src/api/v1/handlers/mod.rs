pub mod auth;
pub mod bookings;
mod documents;
pub mod health;
pub mod products;
pub mod services;
