use anyhow::{Context, Result};

/// `DATABASE_URL` value selecting the in-memory backend.
pub const MEMORY_BACKEND: &str = "memory";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string, e.g. "sqlite:./linkpage.db", or "memory"
    /// to keep every record in process memory.
    pub database_url: String,

    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Public base URL of the profile page, e.g. "https://links.example.com"
    /// Must NOT have a trailing slash.
    pub base_url: String,

    /// How many hours an admin session token remains valid
    pub session_duration_hours: u64,

    /// Delay applied before every password check, in milliseconds.
    pub login_delay_ms: u64,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;

        let session_duration_hours = std::env::var("SESSION_DURATION_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse::<u64>()
            .unwrap_or(24);

        let login_delay_ms = std::env::var("LOGIN_DELAY_MS")
            .unwrap_or_else(|_| "800".into())
            .parse::<u64>()
            .context("LOGIN_DELAY_MS must be a whole number of milliseconds")?;

        let base_url = std::env::var("BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./linkpage.db".into()),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            base_url,
            session_duration_hours,
            login_delay_ms,
        })
    }

    /// Whether records should live in memory instead of SQLite.
    pub fn uses_memory_backend(&self) -> bool {
        self.database_url == MEMORY_BACKEND
    }

    /// Address to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Public URL of the profile page for `page_url`.
    pub fn profile_url(&self, page_url: &str) -> String {
        format!("{}/{}", self.base_url, page_url)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: MEMORY_BACKEND.into(),
            host: "127.0.0.1".into(),
            port: 3000,
            base_url: "http://localhost:3000".into(),
            session_duration_hours: 24,
            login_delay_ms: 0,
        }
    }
}
