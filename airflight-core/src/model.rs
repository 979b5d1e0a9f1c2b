//! Rows of the airline schema and the values inserted into it.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Airport {
    pub airport_id: i32,
    pub airport_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub landing_price: Option<f64>,
    pub airport_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAirport {
    pub airport_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub landing_price: Option<f64>,
    pub airport_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Company {
    pub company_id: i32,
    pub name: String,
    pub country: Option<String>,
    pub iata_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub name: String,
    pub country: String,
    pub iata_code: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Plane {
    pub plane_id: i32,
    pub model: String,
    pub manufacturer: String,
    pub range_km: i32,
    pub passenger_capacity: i32,
    pub cruising_speed_kph: Option<i32>,
    pub weight_kg: Option<i32>,
    pub tank_capacity_gallon: Option<i32>,
    pub company_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPlane {
    pub model: String,
    pub manufacturer: String,
    pub range_km: i32,
    pub passenger_capacity: i32,
    pub cruising_speed_kph: Option<i32>,
    pub weight_kg: Option<i32>,
    pub tank_capacity_gallon: Option<i32>,
    pub company_id: i32,
}

/// A flight row. Everything but the route is empty while the flight is pending.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Flight {
    pub flight_id: i32,
    pub flight_code: Option<String>,
    pub flight_status: bool,
    pub airport_departure: i32,
    pub airport_arrival: i32,
    pub time_departure: Option<NaiveDateTime>,
    pub time_arrival: Option<NaiveDateTime>,
    pub distance: i32,
    pub flight_time_minutes: Option<i32>,
    pub nb_passenger: Option<i32>,
    pub plane_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPassenger {
    pub name: String,
    pub surname: String,
    pub phone_number: String,
    pub mail: String,
    pub gender: Gender,
    /// Passengers travelling together share a group and book together.
    pub group: usize,
    pub ticket_price_dollar: Option<i32>,
    pub purchase_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NewConsumption {
    pub barrel_price_dollar: f64,
    pub total_fuel_price_dollar: i32,
    pub total_fuel_volume_gallons: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IncomeTopic {
    Tickets,
    Fuel,
    Landing,
}

impl IncomeTopic {
    pub fn as_str(self) -> &'static str {
        match self {
            IncomeTopic::Tickets => "TICKETS",
            IncomeTopic::Fuel => "FUEL",
            IncomeTopic::Landing => "LANDING",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewIncome {
    pub income: i32,
    pub transaction_date: NaiveDateTime,
    pub topic: IncomeTopic,
    pub company_id: i32,
}

/// Everything written for one flown flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightRecord {
    pub flight_code: String,
    pub airport_departure: i32,
    pub airport_arrival: i32,
    pub time_departure: NaiveDateTime,
    pub time_arrival: NaiveDateTime,
    pub distance: i32,
    pub flight_time_minutes: i32,
    pub nb_passenger: i32,
    pub plane_id: i32,
    pub passengers: Vec<NewPassenger>,
    pub consumption: NewConsumption,
    pub incomes: Vec<NewIncome>,
}
