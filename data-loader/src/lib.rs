//! Command line overrides shared by the seeding binaries.

use std::path::PathBuf;

use airflight_core::Settings;
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct DataArgs {
    /// Config file (defaults to ./airflight.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the JSON reference files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl DataArgs {
    /// File settings with the command line on top.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings = Settings::load(self.config.as_deref())?;
        Ok(merge_config(settings, self))
    }
}

fn merge_config(mut settings: Settings, cli: &DataArgs) -> Settings {
    if let Some(dir) = &cli.data_dir {
        settings.data.dir = dir.clone();
    }
    settings
}
