use airflight_core::oil::OilPriceSource;
use airflight_core::simulation::simulate_flights;
use airflight_core::telemetry::init_tracing;
use clap::Parser;
use simulator::{load_env, ConnectionArgs, YesNo};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Flight simulation and database insertion", long_about = None)]
struct Cli {
    /// Whether to insert the simulated flights into the database
    #[arg(long, value_enum)]
    db: YesNo,

    /// The number of flights to simulate
    #[arg(long = "nb_f")]
    nb_f: usize,

    #[command(flatten)]
    connection: ConnectionArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env();
    init_tracing();
    let cli = Cli::parse();

    let settings = cli.connection.settings()?;
    let store = cli.connection.connect(&settings).await?;

    let barrel_price = OilPriceSource::new(&settings.oil).current().await;
    info!(
        flights = cli.nb_f,
        insert = cli.db.enabled(),
        barrel_price = %barrel_price,
        "Starting flight simulation"
    );

    let mut rng = rand::thread_rng();
    let summary = simulate_flights(
        &store,
        &mut rng,
        &settings,
        barrel_price,
        cli.nb_f,
        cli.db.enabled(),
    )
    .await;

    println!(
        "Simulated {} flights, recorded {}, failed {}",
        summary.planned, summary.recorded, summary.failed
    );

    store.close().await;
    Ok(())
}
