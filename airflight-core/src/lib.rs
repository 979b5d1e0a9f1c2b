//! Seeding and flight simulation for the airline schema: airports, companies,
//! planes, flights, passengers, fuel consumption and company income.

pub mod config;
pub mod error;
pub mod fleet;
pub mod flight;
pub mod geo;
pub mod loader;
pub mod model;
pub mod oil;
pub mod passengers;
pub mod pricing;
pub mod reference;
pub mod simulation;
pub mod store;
pub mod telemetry;

pub use config::Settings;
pub use error::{Error, Result};
pub use store::{AirlineStore, PgStore};
