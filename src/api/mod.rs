//! API route definitions

pub mod error;
pub mod health;
pub mod movies;
