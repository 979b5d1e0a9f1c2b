use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no database url: pass --database-url, set it in the config file or DATABASE_URL")]
    MissingDatabaseUrl,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("at least two airports are required, found {found}")]
    NotEnoughAirports { found: usize },

    #[error("airport {0} not found")]
    UnknownAirport(i32),

    #[error("no plane with sufficient range found for {distance} km")]
    NoPlaneInRange { distance: i32 },

    #[error("speed for plane '{model}' not available")]
    MissingCruisingSpeed { model: String },

    #[error("weight for plane '{model}' not available")]
    MissingPlaneWeight { model: String },

    #[error("plane '{model}' needs {needed} gallons but its tank holds {capacity}")]
    TankTooSmall {
        model: String,
        needed: i32,
        capacity: i32,
    },

    #[error("date out of range: {base} shifted by {minutes} minutes")]
    DateOutOfRange {
        base: chrono::NaiveDateTime,
        minutes: i64,
    },

    #[error("flight {0} is not pending")]
    FlightNotPending(i32),
}
