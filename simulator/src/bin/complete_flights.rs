use airflight_core::oil::OilPriceSource;
use airflight_core::simulation::complete_pending_flights;
use airflight_core::telemetry::init_tracing;
use clap::Parser;
use simulator::{load_env, ConnectionArgs, YesNo};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fly the pending flights and mark them done", long_about = None)]
struct Cli {
    /// Maximum number of pending flights to process
    #[arg(long, default_value_t = 100)]
    limit: u32,

    /// Whether to write the results to the database
    #[arg(long, value_enum, default_value_t = YesNo::Yes)]
    db: YesNo,

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
    info!(limit = cli.limit, barrel_price = %barrel_price, "Completing pending flights");

    let mut rng = rand::thread_rng();
    let summary = complete_pending_flights(
        &store,
        &mut rng,
        &settings,
        barrel_price,
        cli.limit,
        cli.db.enabled(),
    )
    .await?;

    println!(
        "Completed {} flights, recorded {}, failed {}",
        summary.planned, summary.recorded, summary.failed
    );

    store.close().await;
    Ok(())
}
