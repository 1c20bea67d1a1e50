use fantasy_scoring::ScoringTable;
use nhl_fetcher::{FetcherConfig, NhlClient, PlayerPoolBuilder, PriceAssigner};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = FetcherConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let client = NhlClient::new(&config)?;
    let mut pricer = PriceAssigner::new(config.pricing);
    let pool = PlayerPoolBuilder::new(&client, &config).build(&mut pricer).await?;

    let table = ScoringTable::default();
    info!("Top players:");
    for (i, player) in pool.iter().take(20).enumerate() {
        info!(
            "  {}. {} ({}, {}) - {} pts, {:.1} fantasy, ${}",
            i + 1,
            player.name,
            player.position,
            player.team,
            player.stats.points(),
            player.fantasy_points(&table),
            player.price
        );
    }

    println!("{}", serde_json::to_string_pretty(&pool)?);
    Ok(())
}
