//! Settings read from an optional TOML file (`airflight.toml`) and the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "airflight.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub data: DataSettings,
    pub simulation: SimulationSettings,
    pub pricing: PricingSettings,
    pub fuel: FuelSettings,
    pub oil: OilSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataSettings {
    pub dir: PathBuf,
    pub airports: String,
    pub airlines: String,
    pub planes: String,
    pub fleets: String,
    pub min_planes_per_airline: usize,
    pub max_planes_per_airline: usize,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            airports: "airport_coordinates.json".to_string(),
            airlines: "airline_companies.json".to_string(),
            planes: "plane_data.json".to_string(),
            fleets: "airline_plane_data.json".to_string(),
            min_planes_per_airline: 10,
            max_planes_per_airline: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Departures are drawn within this many days from now.
    pub departure_horizon_days: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            departure_horizon_days: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingSettings {
    pub base_fare_dollar: f64,
    pub per_km_dollar: f64,
    pub min_fare_dollar: i32,
    pub max_booking_days: u32,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            base_fare_dollar: 50.0,
            per_km_dollar: 0.11,
            min_fare_dollar: 30,
            max_booking_days: 180,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FuelSettings {
    pub passenger_weight_kg: i32,
    pub luggage_weight_kg: i32,
    pub burn_kg_per_tonne_km: f64,
    pub kg_per_gallon: f64,
}

impl Default for FuelSettings {
    fn default() -> Self {
        Self {
            passenger_weight_kg: 75,
            luggage_weight_kg: 15,
            burn_kg_per_tonne_km: 0.043,
            kg_per_gallon: 3.04,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OilSettings {
    pub barrel_price_dollar: f64,
    /// Endpoint answering `{"regularMarketPrice": <f64>}`.
    pub quote_url: Option<String>,
}

impl Default for OilSettings {
    fn default() -> Self {
        Self {
            barrel_price_dollar: 80.0,
            quote_url: None,
        }
    }
}

impl Settings {
    /// Reads `path`, or `./airflight.toml` when present, or falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let candidate = path.map(Path::to_path_buf).or_else(|| {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if p.exists() {
                Some(p)
            } else {
                None
            }
        });

        match candidate {
            Some(p) => {
                let content = std::fs::read_to_string(&p).map_err(|source| Error::Io {
                    path: p.clone(),
                    source,
                })?;
                Self::parse(&content).map_err(|source| Error::Config { path: p, source })
            }
            None => Ok(Self::default()),
        }
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// CLI flag first, then the config file, then `DATABASE_URL`.
    pub fn database_url(&self, cli: Option<&str>) -> Result<String> {
        cli.map(str::to_string)
            .or_else(|| self.database.url.clone())
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .ok_or(Error::MissingDatabaseUrl)
    }
}
