use anyhow::{Context, Result};

const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_JUDGE0_URL: &str = "https://judge0-ce.p.rapidapi.com";
const DEFAULT_RESUME_ROLE: &str = "Web Developer";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub jwt_secret: String,
    /// Expected `aud` claim. Audience is not checked when unset.
    pub jwt_audience: Option<String>,
    pub frontend_url: String,
    pub judge0_url: String,
    pub judge0_api_key: Option<String>,
    pub judge0_poll_ms: u64,
    /// Target role for resume evaluation when the upload does not name one.
    pub resume_role: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_audience: optional_env("JWT_AUDIENCE"),
            frontend_url: optional_env("FRONTEND_URL")
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            judge0_url: optional_env("JUDGE0_URL")
                .unwrap_or_else(|| DEFAULT_JUDGE0_URL.to_string()),
            judge0_api_key: optional_env("JUDGE0_API_KEY"),
            judge0_poll_ms: optional_env("JUDGE0_POLL_MS")
                .unwrap_or_else(|| "1000".to_string())
                .parse::<u64>()
                .context("JUDGE0_POLL_MS must be a number of milliseconds")?,
            resume_role: optional_env("RESUME_ROLE")
                .unwrap_or_else(|| DEFAULT_RESUME_ROLE.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, treating an empty value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
