use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::AirlineStore;
use crate::error::{Error, Result};
use crate::model::{
    Airport, Company, Flight, FlightRecord, NewAirport, NewCompany, NewConsumption, NewIncome,
    NewPassenger, NewPlane, Plane,
};

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub airports: Vec<Airport>,
    pub companies: Vec<Company>,
    pub planes: Vec<Plane>,
    pub flights: Vec<Flight>,
    pub passengers: Vec<(i32, NewPassenger)>,
    pub consumptions: Vec<(i32, NewConsumption)>,
    pub incomes: Vec<NewIncome>,
}

/// In-process stand-in for the database.
#[derive(Debug)]
pub(crate) struct MemoryStore {
    tables: Mutex<Tables>,
    sampler: Mutex<StdRng>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl MemoryStore {
    /// `seed` drives the random airport picks.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            tables: Mutex::default(),
            sampler: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    fn write_details(tables: &mut Tables, flight_id: i32, record: &FlightRecord) {
        for p in &record.passengers {
            tables.passengers.push((flight_id, p.clone()));
        }
        tables.consumptions.push((flight_id, record.consumption));
        tables.incomes.extend(record.incomes.iter().cloned());
    }
}

fn next_id(len: usize) -> i32 {
    len as i32 + 1
}

impl AirlineStore for MemoryStore {
    async fn insert_airport(&self, airport: &NewAirport) -> Result<i32> {
        let mut t = self.tables();
        if t.airports.iter().any(|a| a.airport_code == airport.airport_code) {
            return Err(Error::Database(sqlx::Error::Protocol(format!(
                "duplicate airport {}",
                airport.airport_code
            ))));
        }
        let id = next_id(t.airports.len());
        t.airports.push(Airport {
            airport_id: id,
            airport_code: airport.airport_code.clone(),
            latitude: airport.latitude,
            longitude: airport.longitude,
            landing_price: airport.landing_price,
            airport_country: airport.airport_country.clone(),
        });
        Ok(id)
    }

    async fn insert_company(&self, company: &NewCompany) -> Result<i32> {
        let mut t = self.tables();
        if t.companies.iter().any(|c| c.name == company.name) {
            return Err(Error::Database(sqlx::Error::Protocol(format!(
                "duplicate company {}",
                company.name
            ))));
        }
        let id = next_id(t.companies.len());
        t.companies.push(Company {
            company_id: id,
            name: company.name.clone(),
            country: Some(company.country.clone()),
            iata_code: Some(company.iata_code.clone()),
        });
        Ok(id)
    }

    async fn company_by_name(&self, name: &str) -> Result<Option<Company>> {
        Ok(self.tables().companies.iter().find(|c| c.name == name).cloned())
    }

    async fn company(&self, company_id: i32) -> Result<Option<Company>> {
        Ok(self
            .tables()
            .companies
            .iter()
            .find(|c| c.company_id == company_id)
            .cloned())
    }

    async fn insert_plane(&self, plane: &NewPlane) -> Result<i32> {
        let mut t = self.tables();
        let id = next_id(t.planes.len());
        t.planes.push(Plane {
            plane_id: id,
            model: plane.model.clone(),
            manufacturer: plane.manufacturer.clone(),
            range_km: plane.range_km,
            passenger_capacity: plane.passenger_capacity,
            cruising_speed_kph: plane.cruising_speed_kph,
            weight_kg: plane.weight_kg,
            tank_capacity_gallon: plane.tank_capacity_gallon,
            company_id: Some(plane.company_id),
        });
        Ok(id)
    }

    async fn random_airports(&self, limit: u32) -> Result<Vec<Airport>> {
        let t = self.tables();
        let mut sampler = self.sampler.lock().unwrap();
        Ok(t.airports
            .choose_multiple(&mut *sampler, limit as usize)
            .cloned()
            .collect())
    }

    async fn company_plane_count(&self, company_id: i32) -> Result<i64> {
        Ok(self
            .tables()
            .planes
            .iter()
            .filter(|p| p.company_id == Some(company_id))
            .count() as i64)
    }

    async fn airport(&self, airport_id: i32) -> Result<Option<Airport>> {
        Ok(self
            .tables()
            .airports
            .iter()
            .find(|a| a.airport_id == airport_id)
            .cloned())
    }

    async fn planes_in_range(&self, distance: i32) -> Result<Vec<Plane>> {
        Ok(self
            .tables()
            .planes
            .iter()
            .filter(|p| p.range_km >= distance)
            .cloned()
            .collect())
    }

    async fn record_flight(&self, record: &FlightRecord) -> Result<i32> {
        let mut t = self.tables();
        let id = next_id(t.flights.len());
        t.flights.push(Flight {
            flight_id: id,
            flight_code: Some(record.flight_code.clone()),
            flight_status: true,
            airport_departure: record.airport_departure,
            airport_arrival: record.airport_arrival,
            time_departure: Some(record.time_departure),
            time_arrival: Some(record.time_arrival),
            distance: record.distance,
            flight_time_minutes: Some(record.flight_time_minutes),
            nb_passenger: Some(record.nb_passenger),
            plane_id: Some(record.plane_id),
        });
        Self::write_details(&mut t, id, record);
        Ok(id)
    }

    async fn insert_pending_flight(
        &self,
        airport_departure: i32,
        airport_arrival: i32,
        distance: i32,
    ) -> Result<i32> {
        let mut t = self.tables();
        let id = next_id(t.flights.len());
        t.flights.push(Flight {
            flight_id: id,
            flight_code: None,
            flight_status: false,
            airport_departure,
            airport_arrival,
            time_departure: None,
            time_arrival: None,
            distance,
            flight_time_minutes: None,
            nb_passenger: None,
            plane_id: None,
        });
        Ok(id)
    }

    async fn pending_flights(&self, limit: u32) -> Result<Vec<Flight>> {
        Ok(self
            .tables()
            .flights
            .iter()
            .filter(|f| !f.flight_status)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn complete_flight(&self, flight_id: i32, record: &FlightRecord) -> Result<()> {
        let mut t = self.tables();
        let flight = t
            .flights
            .iter_mut()
            .find(|f| f.flight_id == flight_id && !f.flight_status)
            .ok_or(Error::FlightNotPending(flight_id))?;

        flight.flight_code = Some(record.flight_code.clone());
        flight.flight_status = true;
        flight.time_departure = Some(record.time_departure);
        flight.time_arrival = Some(record.time_arrival);
        flight.flight_time_minutes = Some(record.flight_time_minutes);
        flight.nb_passenger = Some(record.nb_passenger);
        flight.plane_id = Some(record.plane_id);

        Self::write_details(&mut t, flight_id, record);
        Ok(())
    }
}
