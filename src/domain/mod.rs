pub mod coerce;
pub mod models;
pub mod repository;
