//! Movieshelf - movie catalog backend service
//!
//! A small REST API over a single movies table: list with attribute
//! filters, create, update, delete.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
