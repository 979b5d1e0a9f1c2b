//! Shared command line pieces of the simulator binaries.

use std::path::PathBuf;

use airflight_core::{PgStore, Settings};
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn enabled(self) -> bool {
        self == YesNo::Yes
    }
}

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Config file (defaults to ./airflight.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overrides the config file and DATABASE_URL
    #[arg(long)]
    pub database_url: Option<String>,
}

impl ConnectionArgs {
    pub fn settings(&self) -> anyhow::Result<Settings> {
        Ok(Settings::load(self.config.as_deref())?)
    }

    /// Connects and creates missing tables.
    pub async fn connect(&self, settings: &Settings) -> anyhow::Result<PgStore> {
        let url = settings.database_url(self.database_url.as_deref())?;
        let store = PgStore::connect(&url, settings.database.max_connections).await?;
        store.migrate().await?;
        Ok(store)
    }
}

/// `.env` in the working directory, or the one next to the simulator crate.
pub fn load_env() {
    dotenvy::dotenv()
        .ok()
        .or_else(|| dotenvy::from_filename("simulator/.env").ok());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Probe {
        #[arg(long, value_enum)]
        db: YesNo,

        #[command(flatten)]
        connection: ConnectionArgs,
    }

    #[test]
    fn parses_yes_no_and_connection_flags() {
        let probe = Probe::parse_from([
            "probe",
            "--db",
            "no",
            "--database-url",
            "postgres://localhost/airflight",
        ]);
        assert!(!probe.db.enabled());
        assert_eq!(
            probe.connection.database_url.as_deref(),
            Some("postgres://localhost/airflight")
        );
        assert!(Probe::try_parse_from(["probe", "--db", "maybe"]).is_err());
    }
}
