use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://bookshelf.db?mode=rwc";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub cors_allowed_origins: Vec<String>,
    pub seed_demo: bool,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            seed_demo: env::var("SEED_DEMO").is_ok(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_connections: 5,
            cors_allowed_origins: Vec::new(),
            seed_demo: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..Config::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_connections, 5);
        assert!(config.cors_allowed_origins.is_empty());
        assert!(!config.seed_demo);
    }
}
