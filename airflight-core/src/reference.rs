//! JSON reference data the schema is seeded from.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::DataSettings;
use crate::error::{Error, Result};

/// `airport_coordinates.json` entry: either a bare `[lat, lon]` pair or an object.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AirportEntry {
    Coordinates(f64, f64),
    Detailed {
        lat: f64,
        lon: f64,
        #[serde(default)]
        country: Option<String>,
        #[serde(default)]
        landing_price: Option<f64>,
    },
}

impl AirportEntry {
    pub fn latitude(&self) -> f64 {
        match self {
            AirportEntry::Coordinates(lat, _) => *lat,
            AirportEntry::Detailed { lat, .. } => *lat,
        }
    }

    pub fn longitude(&self) -> f64 {
        match self {
            AirportEntry::Coordinates(_, lon) => *lon,
            AirportEntry::Detailed { lon, .. } => *lon,
        }
    }

    pub fn country(&self) -> Option<&str> {
        match self {
            AirportEntry::Coordinates(..) => None,
            AirportEntry::Detailed { country, .. } => country.as_deref(),
        }
    }

    pub fn landing_price(&self) -> Option<f64> {
        match self {
            AirportEntry::Coordinates(..) => None,
            AirportEntry::Detailed { landing_price, .. } => *landing_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AirlineCompany {
    pub country: String,
    pub iata_code: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaneSpec {
    pub model: String,
    pub manufacturer: String,
    pub range_km: i32,
    pub capacity: i32,
    pub cruising_speed_kph: Option<i32>,
    #[serde(rename = "WeightKG", alias = "weight_kg", default)]
    pub weight_kg: Option<i32>,
    #[serde(alias = "TankCapacityInGallon", default)]
    pub tank_capacity_gallon: Option<i32>,
}

/// One airline and the plane keys (into `plane_data.json`) it operates.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AirlineFleet {
    pub country: String,
    pub iata_code: String,
    pub planes: Vec<String>,
}

pub type Airports = BTreeMap<String, AirportEntry>;
pub type Airlines = BTreeMap<String, AirlineCompany>;
pub type Planes = BTreeMap<String, PlaneSpec>;
pub type Fleets = BTreeMap<String, AirlineFleet>;

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, content).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub airports: Airports,
    pub airlines: Airlines,
    pub planes: Planes,
    pub fleets: Fleets,
}

impl ReferenceData {
    pub fn load(data: &DataSettings) -> Result<Self> {
        Ok(Self {
            airports: load_json(&data.path(&data.airports))?,
            airlines: load_json(&data.path(&data.airlines))?,
            planes: load_json(&data.path(&data.planes))?,
            fleets: load_json(&data.path(&data.fleets))?,
        })
    }
}

impl DataSettings {
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}
