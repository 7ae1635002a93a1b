/// Application configuration module
use sqlx::postgres::PgConnectOptions;
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub air_quality: AirQualityClientConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub username: String,
    pub password: String,
    pub pool_size: u32,
}

#[derive(Clone, Debug)]
pub struct AirQualityClientConfig {
    pub base_url: String,
    pub nearest_city_endpoint: String,
    pub api_key: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database = DatabaseConfig {
            host: env_string("DB_HOSTNAME", "localhost"),
            port: env_parsed("DB_PORT", 5432),
            name: env_string("DB_NAME", "postgres"),
            username: env_string("DB_USERNAME", "postgres"),
            password: env_string("DB_PASSWORD", "admin"),
            pool_size: env_parsed("POOL_SIZE", 10),
        };

        let air_quality = AirQualityClientConfig {
            base_url: env_string("AIR_QUALITY_URL", "http://api.airvisual.com/v2"),
            nearest_city_endpoint: env_string("NEAREST_CITY", "nearest_city"),
            api_key: env_string("API_KEY", ""),
        };

        Ok(Self {
            env: env_string("APP_ENV", "development"),
            port: env_parsed("APP_PORT", 3005),
            database,
            air_quality,
        })
    }
}

impl DatabaseConfig {
    /// Connection options for the Postgres pool
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.username)
            .password(&self.password)
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
