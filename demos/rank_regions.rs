//! Ranks the bundled Indian region catalog by today's solar energy potential, then
//! estimates one extra point given on the command line.
//!
//! Run with `RUST_LOG=info cargo run --example rank_regions -- 12.97 77.59`.

use solar_rank::{Coordinate, RankingPipeline, RegionCatalog, SolarConfig, SolarError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), SolarError> {
    env_logger::init();

    let config = match env::var("SOLAR_RANK_CONFIG") {
        Ok(path) => SolarConfig::load(path)?,
        Err(_) => SolarConfig::default(),
    };
    let pipeline = RankingPipeline::from_config(&config)?;
    let catalog = RegionCatalog::bundled();
    let today = pipeline.today();

    let snapshot = pipeline.compute_ranked_snapshot(&catalog, today).await;
    println!("Top {} of {} regions for {}:", snapshot.len(), catalog.len(), today);
    for (rank, row) in snapshot.iter().enumerate() {
        println!(
            "{:>2}. {:<20} {:>7.2} MJ/m²  ({:.1} °C, {:.0}% cloud, {:.2} h daylight)",
            rank + 1,
            row.region_name,
            row.energy_mj,
            row.temperature_celsius,
            row.cloud_cover_percent,
            row.daylight_hours
        );
    }

    let args: Vec<String> = env::args().skip(1).collect();
    if let [latitude, longitude, ..] = args.as_slice() {
        let coordinate = Coordinate::parse(Some(latitude.as_str()), Some(longitude.as_str()))?;
        let result = pipeline
            .compute_single()
            .coordinate(coordinate)
            .date(today)
            .maybe_region_name(args.get(2).map(String::as_str))
            .call()
            .await;
        println!("\n{:#?}", result);
    }

    Ok(())
}
