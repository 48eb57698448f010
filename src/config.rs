#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_pass: String,
    pub db_name: String,
    pub top_n: i64,
}

impl Config {
    /// Reads the six connection/report settings from the environment,
    /// falling back to the documented defaults when a variable is unset.
    ///
    /// `DB_PORT` and `APP_TOP_N` must parse as integers; anything else is
    /// a fatal startup error. Values that parse are passed through without
    /// range checks; rejecting out-of-range ones is left to the connector
    /// and the query layer.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            db_host: std::env::var("DB_HOST").unwrap_or_else(|_| "db".to_string()),
            db_port: std::env::var("DB_PORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_PORT must be a valid number between 1-65535"))?,
            db_user: std::env::var("DB_USER").unwrap_or_else(|_| "appuser".to_string()),
            db_pass: std::env::var("DB_PASS").unwrap_or_else(|_| "secretpw".to_string()),
            db_name: std::env::var("DB_NAME").unwrap_or_else(|_| "appdb".to_string()),
            top_n: std::env::var("APP_TOP_N")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("APP_TOP_N must be a valid integer"))?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database: {}@{}:{}/{}",
            config.db_user,
            config.db_host,
            config.db_port,
            config.db_name
        );
        tracing::debug!("Top N: {}", config.top_n);

        Ok(config)
    }
}
