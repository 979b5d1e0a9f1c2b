//! Persistence of the airline schema.
//!
//! Simulation and seeding code talk to an [`AirlineStore`]; [`PgStore`] is the
//! PostgreSQL implementation used by the binaries.

#[cfg(test)]
pub(crate) mod memory;
mod postgres;

pub use postgres::PgStore;

use crate::error::Result;
use crate::model::{
    Airport, Company, Flight, FlightRecord, NewAirport, NewCompany, NewPlane, Plane,
};

#[allow(async_fn_in_trait)]
pub trait AirlineStore {
    async fn insert_airport(&self, airport: &NewAirport) -> Result<i32>;

    async fn insert_company(&self, company: &NewCompany) -> Result<i32>;

    async fn company_by_name(&self, name: &str) -> Result<Option<Company>>;

    async fn company(&self, company_id: i32) -> Result<Option<Company>>;

    async fn insert_plane(&self, plane: &NewPlane) -> Result<i32>;

    /// Planes already owned by `company_id`.
    async fn company_plane_count(&self, company_id: i32) -> Result<i64>;

    /// Up to `limit` distinct airports in random order.
    async fn random_airports(&self, limit: u32) -> Result<Vec<Airport>>;

    async fn airport(&self, airport_id: i32) -> Result<Option<Airport>>;

    /// Every plane whose range covers `distance` km.
    async fn planes_in_range(&self, distance: i32) -> Result<Vec<Plane>>;

    /// Writes a flown flight with its passengers, consumption and ledger; returns its id.
    async fn record_flight(&self, record: &FlightRecord) -> Result<i32>;

    async fn insert_pending_flight(
        &self,
        airport_departure: i32,
        airport_arrival: i32,
        distance: i32,
    ) -> Result<i32>;

    /// Flights not flown yet, oldest first.
    async fn pending_flights(&self, limit: u32) -> Result<Vec<Flight>>;

    /// Marks a pending flight as flown and writes its details.
    async fn complete_flight(&self, flight_id: i32, record: &FlightRecord) -> Result<()>;
}
