use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trip_report::config::Config;
use trip_report::db::{Database, CONNECT_ATTEMPTS, RETRY_DELAY};
use trip_report::models::Summary;
use trip_report::{output, report};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; diagnostics go to stderr so stdout carries only
    // the summary document.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Open the database session, waiting for the database to come up
    let db = Database::connect_with_retry(&config, CONNECT_ATTEMPTS, RETRY_DELAY).await?;

    // Run the three aggregate queries, sequentially, on the one session
    let total_trips = report::total_trips(&db.pool).await?;
    let avg_fare_by_city = report::avg_fare_by_city(&db.pool).await?;
    let top_trips = report::top_longest_trips(&db.pool, config.top_n).await?;

    // The session is done once the results are materialized
    db.close().await;

    let summary = Summary::new(total_trips, avg_fare_by_city, top_trips, config.top_n);
    output::write_summary(Path::new(output::OUT_DIR), &summary)?;

    Ok(())
}
