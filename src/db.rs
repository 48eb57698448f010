use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgConnection, PgPoolOptions};
use sqlx::{Connection, PgPool};

use crate::config::Config;

/// Connection attempts the binary allows before giving up.
pub const CONNECT_ATTEMPTS: u32 = 10;
/// Pause after each failed attempt.
pub const RETRY_DELAY: Duration = Duration::from_secs(3);
/// Time limit for establishing the session within a single attempt.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    /// Opens a database session, retrying on failure until the database
    /// comes up or the attempts are spent, pausing `delay` after each
    /// failure. The binary passes [`CONNECT_ATTEMPTS`] and
    /// [`RETRY_DELAY`].
    ///
    /// Each attempt connects directly, bounded by a per-attempt time
    /// limit, so the concrete connection error stays observable in the
    /// logs and in the final report. Every connection error is retried
    /// identically; there is no classification of transient versus
    /// permanent failures. After the last attempt the most recent error
    /// is returned, wrapped with context, and the caller decides the
    /// exit.
    pub async fn connect_with_retry(
        config: &Config,
        attempts: u32,
        delay: Duration,
    ) -> anyhow::Result<Self> {
        let options = PgConnectOptions::new()
            .host(&config.db_host)
            .port(config.db_port)
            .username(&config.db_user)
            .password(&config.db_pass)
            .database(&config.db_name);

        let mut last_err: Option<anyhow::Error> = None;

        for attempt in 1..=attempts {
            let connected =
                tokio::time::timeout(CONNECT_TIMEOUT, PgConnection::connect_with(&options))
                    .await
                    .map_err(|_| {
                        anyhow::anyhow!(
                            "connection attempt timed out after {}s",
                            CONNECT_TIMEOUT.as_secs()
                        )
                    })
                    .and_then(|result| result.map_err(anyhow::Error::new));

            match connected {
                Ok(conn) => {
                    tracing::info!("Successfully connected to the database");
                    // Reachability established; the queries get their own
                    // session through the pool.
                    conn.close().await.ok();
                    // The pool holds a single connection: the three report
                    // queries share one session, run sequentially.
                    let pool = PgPoolOptions::new()
                        .max_connections(1)
                        .acquire_timeout(CONNECT_TIMEOUT)
                        .connect_lazy_with(options.clone());
                    return Ok(Self { pool });
                }
                Err(e) => {
                    tracing::warn!("Waiting for database... (attempt {}/{})", attempt, attempts);
                    tracing::debug!("Connection attempt failed: {}", e);
                    last_err = Some(e);
                }
            }
            tokio::time::sleep(delay).await;
        }

        let err = last_err.unwrap_or_else(|| anyhow::anyhow!("no connection attempts were made"));
        Err(err.context(format!(
            "failed to connect to Postgres after {} attempts",
            attempts
        )))
    }

    /// Gracefully closes the underlying pool. Dropping a `Database` also
    /// releases the session; this makes the success path explicit.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// `io::Write` over shared bytes so the test can read back what the
    /// subscriber wrote.
    #[derive(Clone, Default)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl LogSink {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn refused_config() -> Config {
        // Nothing listens on port 1, so every attempt fails immediately.
        Config {
            db_host: "127.0.0.1".to_string(),
            db_port: 1,
            db_user: "appuser".to_string(),
            db_pass: "secretpw".to_string(),
            db_name: "appdb".to_string(),
            top_n: 5,
        }
    }

    #[tokio::test]
    async fn retry_exhaustion_reports_last_cause_and_logs_each_attempt() {
        let sink = LogSink::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let started = std::time::Instant::now();
        let result = Database::connect_with_retry(&refused_config(), 2, Duration::ZERO).await;
        let err = match result {
            Ok(_) => panic!("connected to a port nothing listens on"),
            Err(e) => e,
        };

        // A refused connection fails the attempt at once instead of
        // sitting out the per-attempt time limit.
        assert!(started.elapsed() < CONNECT_TIMEOUT);

        let chain = format!("{:#}", err);
        assert!(
            chain.contains("failed to connect to Postgres after 2 attempts"),
            "unexpected error chain: {chain}"
        );
        assert!(chain.contains("refused"), "cause lost from chain: {chain}");

        let logged = sink.contents();
        assert_eq!(
            logged.matches("Waiting for database... (attempt").count(),
            2,
            "unexpected log output: {logged}"
        );
        assert!(logged.contains("(attempt 1/2)"), "{logged}");
        assert!(logged.contains("(attempt 2/2)"), "{logged}");
    }
}
