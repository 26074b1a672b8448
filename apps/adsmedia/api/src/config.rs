use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_adsmedia::AdsMediaConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub adsmedia: AdsMediaConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8000 unless set
        let adsmedia = AdsMediaConfig::from_env()?; // Required - fails without ADSMEDIA_API_KEY

        Ok(Self {
            app: app_info!(),
            adsmedia,
            server,
            environment,
        })
    }
}
