use std::{net::SocketAddr, time::Duration};

/// Server configuration, read once from the environment at startup.
///
/// Neither the AI credential nor the database path is required: their
/// absence selects the mock synthesizer and the in-memory store
/// respectively — degraded but functional modes, not startup errors.
pub struct Config {
    pub listen_addr: SocketAddr,
    /// SQLite file path; absence selects the in-memory store.
    pub db_path: Option<String>,
    /// Anthropic credential; absence selects the mock synthesizer.
    pub anthropic_api_key: Option<String>,
    pub ai_model: String,
    pub ai_timeout_ms: u64,
    /// Pricing preset selector ("INR" or "USD").
    pub currency: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("QS_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid QS_LISTEN_ADDR");
        let db_path = non_empty("QS_DB_PATH");
        let anthropic_api_key = non_empty("ANTHROPIC_API_KEY");
        let ai_model =
            non_empty("QS_AI_MODEL").unwrap_or_else(|| "claude-sonnet-4-20250514".to_string());
        let ai_timeout_ms: u64 = std::env::var("QS_AI_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let currency = non_empty("QS_CURRENCY").unwrap_or_else(|| "INR".to_string());
        let cors_allow = std::env::var("QS_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("QS_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "60000".into())
            .parse()
            .unwrap_or(60000);
        Self {
            listen_addr,
            db_path,
            anthropic_api_key,
            ai_model,
            ai_timeout_ms,
            currency,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }
}
