/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks after the listener stops
    /// (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// Largest accepted request body in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// Lifetime of cached analyses in seconds (default: `3600`).
    pub analysis_cache_ttl_secs: u64,
    /// Uploads larger than this on either side are downscaled before
    /// analysis (default: `1024`).
    pub max_image_dimension: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `8000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `10`                    |
    /// | `MAX_UPLOAD_BYTES`        | `10485760`              |
    /// | `ANALYSIS_CACHE_TTL_SECS` | `3600`                  |
    /// | `MAX_IMAGE_DIMENSION`     | `1024`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = env_or("PORT", 8000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 10),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
            analysis_cache_ttl_secs: env_or("ANALYSIS_CACHE_TTL_SECS", 3600),
            max_image_dimension: env_or("MAX_IMAGE_DIMENSION", 1024),
        }
    }
}

/// Parse an env var, falling back to `default` when unset. Invalid values
/// abort startup.
fn env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be valid: {e}")),
        Err(_) => default,
    }
}
