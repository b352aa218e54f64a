use anyhow::Context;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const ENVIRONMENTS: [&str; 3] = ["development", "test", "production"];

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub currency: String,
    pub remove_label: String,
    pub image_src: String,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            currency: "€".to_string(),
            remove_label: "Supprimer".to_string(),
            image_src: "./image/imge1.webp".to_string(),
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Environment first, then the command line flags on top of it.
    pub fn from_env(catalog: Option<PathBuf>, currency: Option<String>) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Config::default();
        let config = Config {
            catalog_path: env::var("CART_CATALOG")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            currency: env::var("CART_CURRENCY").unwrap_or(defaults.currency),
            remove_label: env::var("CART_REMOVE_LABEL").unwrap_or(defaults.remove_label),
            image_src: env::var("CART_IMAGE").unwrap_or(defaults.image_src),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
        };

        config.with_overrides(catalog, currency)
    }

    pub fn with_overrides(mut self, catalog: Option<PathBuf>, currency: Option<String>) -> anyhow::Result<Self> {
        if let Some(path) = catalog {
            self.catalog_path = Some(path);
        }
        if let Some(currency) = currency {
            self.currency = currency;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.currency.trim().is_empty() {
            return Err(anyhow::anyhow!("CART_CURRENCY must not be empty"));
        }

        if let Some(path) = &self.catalog_path {
            if !path.is_file() {
                return Err(anyhow::anyhow!(
                    "CART_CATALOG points to a missing file: {}",
                    path.display()
                ));
            }
        }

        if !ENVIRONMENTS.contains(&self.environment.as_str()) {
            return Err(anyhow::anyhow!(
                "APP_ENV must be one of {}",
                ENVIRONMENTS.join(", ")
            ));
        }

        if self.is_production() && self.catalog_path.is_none() {
            return Err(anyhow::anyhow!(
                "CART_CATALOG must be set in production, the demo catalog is for development only"
            ));
        }

        EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("LOG_LEVEL is not a valid filter: {}", self.log_level))?;

        Ok(())
    }

    /// `debug` when verbose, `LOG_LEVEL` otherwise.
    pub fn log_filter(&self, verbose: bool) -> anyhow::Result<EnvFilter> {
        let level = if verbose { "debug" } else { self.log_level.as_str() };
        EnvFilter::try_new(level)
            .with_context(|| format!("LOG_LEVEL is not a valid filter: {}", level))
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
