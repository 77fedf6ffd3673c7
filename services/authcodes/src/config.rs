use anyhow::Context as _;

/// Auth codes service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AuthCodesConfig {
    /// Database connection URL (PostgreSQL in production).
    pub database_url: String,
    /// PostgreSQL schema holding `auth_codes`, applied as the connection's
    /// `search_path`. Unset uses the server default. Env var: `DATABASE_SCHEMA`.
    pub database_schema: Option<String>,
    /// TCP port to listen on (default 3114). Env var: `AUTHCODES_PORT`.
    pub authcodes_port: u16,
    /// Apply pending migrations before serving. Env var: `RUN_MIGRATIONS`.
    pub run_migrations: bool,
}

impl AuthCodesConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_schema: lookup("DATABASE_SCHEMA").filter(|v| !v.trim().is_empty()),
            authcodes_port: lookup("AUTHCODES_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            run_migrations: lookup("RUN_MIGRATIONS")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}
