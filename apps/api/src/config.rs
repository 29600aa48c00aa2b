use core_config::{server::ServerConfig, uploads::UploadsConfig, FromEnv};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub uploads: UploadsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - fails if DATABASE_URL is unset
        let server = ServerConfig::from_env()?; // Defaults: HOST=0.0.0.0, PORT=3000
        let uploads = UploadsConfig::from_env()?;

        Ok(Self {
            database,
            server,
            uploads,
            environment,
        })
    }
}
