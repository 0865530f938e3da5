pub mod activities;
pub mod activity_types;
pub mod apartments;
pub mod auth;
pub mod bookings;
pub mod towers;
pub mod users;
