use std::env;
use std::str::FromStr;

/// Whether the random video sampler leaves the requesting user out of the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSamplerMode {
    /// `username` is required and that user's rows are never sampled
    ExcludeRequester,
    /// Any user with videos can be sampled; the request body is ignored
    Everyone,
}

impl FromStr for VideoSamplerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(Self::ExcludeRequester),
            "absent" => Ok(Self::Everyone),
            _ => Err(ConfigError::Invalid("VIDEO_SAMPLER_EXCLUDE_IDENTIFIER")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,

    // Server
    pub host: String,
    pub port: u16,

    // Features
    pub video_sampler: VideoSamplerMode,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
            db_min_connections: parse_var("DB_MIN_CONNECTIONS", 1)?,

            // Server
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 3000)?,

            // Features
            video_sampler: match env::var("VIDEO_SAMPLER_EXCLUDE_IDENTIFIER") {
                Ok(value) => value.parse()?,
                Err(_) => VideoSamplerMode::ExcludeRequester,
            },
        })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_mode_parsing() {
        assert_eq!(
            "present".parse::<VideoSamplerMode>().unwrap(),
            VideoSamplerMode::ExcludeRequester
        );
        assert_eq!(
            " Absent ".parse::<VideoSamplerMode>().unwrap(),
            VideoSamplerMode::Everyone
        );
        assert!(matches!(
            "sometimes".parse::<VideoSamplerMode>(),
            Err(ConfigError::Invalid("VIDEO_SAMPLER_EXCLUDE_IDENTIFIER"))
        ));
    }

    #[test]
    fn test_server_addr() {
        let config = Config {
            database_url: "postgres://localhost/groovi".to_string(),
            db_max_connections: 10,
            db_min_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 8080,
            video_sampler: VideoSamplerMode::Everyone,
        };

        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}
