use anyhow::{Context, Result};
use bigdecimal::{BigDecimal, ToPrimitive};
use sqlx::PgPool;

use crate::models::{CityFare, TopTrip};

/// Total number of rows in `trips`.
pub async fn total_trips(pool: &PgPool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM trips")
        .fetch_one(pool)
        .await
        .context("failed to count trips")
}

/// Average fare per city, ordered by city name ascending.
///
/// Averages come back from Postgres as NUMERIC and are coerced to `f64`
/// here, on the client side.
pub async fn avg_fare_by_city(pool: &PgPool) -> Result<Vec<CityFare>> {
    let rows: Vec<(String, BigDecimal)> =
        sqlx::query_as("SELECT city, AVG(fare) FROM trips GROUP BY city ORDER BY city")
            .fetch_all(pool)
            .await
            .context("failed to average fares by city")?;

    rows.into_iter()
        .map(|(city, avg)| -> Result<CityFare> {
            let avg_fare = avg
                .to_f64()
                .with_context(|| format!("average fare for city {} does not fit in f64", city))?;
            Ok(CityFare { city, avg_fare })
        })
        .collect()
}

/// The `top_n` longest trips by duration, longest first. Rows with equal
/// durations come back in whatever order the database yields them.
///
/// `top_n` is bound as the LIMIT parameter unchecked; Postgres rejects a
/// negative value and the error propagates to the caller.
pub async fn top_longest_trips(pool: &PgPool, top_n: i64) -> Result<Vec<TopTrip>> {
    let rows: Vec<(String, i32, BigDecimal)> =
        sqlx::query_as("SELECT city, minutes, fare FROM trips ORDER BY minutes DESC LIMIT $1")
            .bind(top_n)
            .fetch_all(pool)
            .await
            .context("failed to select longest trips")?;

    rows.into_iter()
        .map(|(city, minutes, fare)| -> Result<TopTrip> {
            let fare = fare
                .to_f64()
                .with_context(|| format!("fare for city {} does not fit in f64", city))?;
            Ok(TopTrip {
                city,
                minutes,
                fare,
            })
        })
        .collect()
}
