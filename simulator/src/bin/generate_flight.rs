use airflight_core::simulation::schedule_flights;
use airflight_core::telemetry::init_tracing;
use clap::Parser;
use simulator::{load_env, ConnectionArgs};

/// Creates pending flights (route and distance only) for `complete_flights` to fly later.
#[derive(Parser, Debug)]
#[command(author, version, about = "Create pending flights between random airports", long_about = None)]
struct Cli {
    /// Number of pending flights to create
    #[arg(long, default_value_t = 1)]
    count: usize,

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

    let ids = schedule_flights(&store, cli.count).await?;
    println!("Data inserted! {} pending flights: {:?}", ids.len(), ids);

    store.close().await;
    Ok(())
}
