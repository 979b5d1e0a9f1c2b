use airflight_core::loader::load_reference_data;
use airflight_core::reference::ReferenceData;
use airflight_core::telemetry::init_tracing;
use airflight_core::PgStore;
use clap::Parser;
use data_loader::DataArgs;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Load airports, companies and planes into the database", long_about = None)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    /// Overrides the config file and DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv()
        .ok()
        .or_else(|| dotenvy::from_filename("data-loader/.env").ok());
    init_tracing();
    let cli = Cli::parse();

    let settings = cli.data.settings()?;
    let reference = ReferenceData::load(&settings.data)?;
    info!(
        airports = reference.airports.len(),
        companies = reference.airlines.len(),
        fleets = reference.fleets.len(),
        dir = %settings.data.dir.display(),
        "Loaded reference data"
    );

    let url = settings.database_url(cli.database_url.as_deref())?;
    let store = PgStore::connect(&url, settings.database.max_connections).await?;
    store.migrate().await?;

    let report = load_reference_data(&store, &reference).await;
    println!(
        "Airports: {} inserted, {} skipped",
        report.airports.inserted, report.airports.skipped
    );
    println!(
        "Companies: {} inserted, {} skipped",
        report.companies.inserted, report.companies.skipped
    );
    println!(
        "Planes: {} inserted, {} skipped",
        report.planes.inserted, report.planes.skipped
    );

    store.close().await;
    Ok(())
}
