use airflight_core::fleet::generate_airline_plane_data;
use airflight_core::reference::{load_json, save_json, Airlines, Planes};
use airflight_core::telemetry::init_tracing;
use clap::Parser;
use data_loader::DataArgs;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate random planes for airline companies", long_about = None)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    /// Fewest plane models per airline
    #[arg(long)]
    min_planes: Option<usize>,

    /// Most plane models per airline
    #[arg(long)]
    max_planes: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = cli.data.settings()?;
    let data = &settings.data;

    let airlines: Airlines = load_json(&data.path(&data.airlines))?;
    let planes: Planes = load_json(&data.path(&data.planes))?;
    info!(airlines = airlines.len(), models = planes.len(), "Loaded reference data");

    let fleets = generate_airline_plane_data(
        &mut rand::thread_rng(),
        &airlines,
        &planes,
        cli.min_planes.unwrap_or(data.min_planes_per_airline),
        cli.max_planes.unwrap_or(data.max_planes_per_airline),
    );

    let output = data.path(&data.fleets);
    save_json(&output, &fleets)?;
    println!("Generated airline-plane data saved to '{}'.", output.display());

    Ok(())
}
