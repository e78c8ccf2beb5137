use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string, e.g. "sqlite:./linkdex.db"
    pub database_url: String,

    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Bearer token every request must present. Required unless
    /// AUTH_ENABLED=false.
    pub api_token: String,

    /// Whether the bearer-token check runs at all. On by default; some
    /// environments (local demos, trusted networks) switch it off.
    pub auth_enabled: bool,

    /// max-age (seconds) for the shared-cache header on every response.
    pub cache_max_age_secs: u32,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy
    /// before this is called).
    pub fn from_env() -> Result<Self> {
        let auth_enabled = std::env::var("AUTH_ENABLED")
            .map(|v| !matches!(v.trim(), "false" | "0" | "off"))
            .unwrap_or(true);

        let api_token = match std::env::var("API_TOKEN") {
            Ok(token) if !token.trim().is_empty() => token,
            _ if !auth_enabled => String::new(),
            _ => anyhow::bail!(
                "API_TOKEN must be set in the environment or .env file (or set AUTH_ENABLED=false)"
            ),
        };

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;

        let cache_max_age_secs = std::env::var("CACHE_MAX_AGE_SECS")
            .unwrap_or_else(|_| "7200".into())
            .parse::<u32>()
            .unwrap_or(7200);

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./linkdex.db".into()),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            api_token,
            auth_enabled,
            cache_max_age_secs,
        })
    }
}
