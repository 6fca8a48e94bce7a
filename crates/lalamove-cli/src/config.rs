/*
[INPUT]:  YAML configuration file and LALAMOVE_* environment variables
[OUTPUT]: Parsed CLI configuration and a ready API client
[POS]:    Configuration layer - account and connection setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use config::{Config, Environment as EnvSource, File};
use lalamove_adapter::{ClientConfig, Credentials, Environment, LalamoveClient};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `LALAMOVE_MARKET=SG`
pub const ENV_PREFIX: &str = "LALAMOVE";

/// Account and connection settings for the CLI
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    pub api_key: String,
    pub api_secret: String,
    /// Default market code for the `Market` header
    #[serde(default = "default_market")]
    pub market: String,
    #[serde(default)]
    pub environment: Environment,
    /// Overrides the environment's base URL; scheme, host and port only
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Fixed Request-ID; a fresh UUID is sent per request when unset
    #[serde(default)]
    pub request_id: Option<String>,
}

fn default_market() -> String {
    "HK".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl CliConfig {
    /// Load configuration from a YAML file with environment overrides on top
    pub fn load(path: &Path) -> Result<Self> {
        let path_str = path.to_str().context("config path must be valid utf-8")?;
        let settings = Config::builder()
            .add_source(File::with_name(path_str))
            .add_source(EnvSource::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("read config {path_str}"))?;

        let config: Self = settings
            .try_deserialize()
            .context("deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("api_key must not be empty");
        }
        if self.api_secret.is_empty() {
            bail!("api_secret must not be empty");
        }
        if self.market.trim().is_empty() {
            bail!("market must not be empty");
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_key.trim(), self.api_secret.as_str())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            environment: self.environment,
            market: self.market.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            request_id: self.request_id.clone(),
            ..ClientConfig::default()
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(self.environment.base_url())
    }

    pub fn build_client(&self) -> Result<LalamoveClient> {
        LalamoveClient::with_config_and_base_url(
            self.credentials(),
            self.client_config(),
            self.base_url(),
        )
        .context("create lalamove client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> CliConfig {
        serde_yaml::from_str(yaml).expect("yaml config")
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let config = parse("api_key: key123\napi_secret: s3cr3t\n");
        assert_eq!(config.market, "HK");
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.base_url(), "https://rest.sandbox.lalamove.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_and_base_url_override() {
        let config = parse(
            "api_key: k\napi_secret: s\nenvironment: production\nmarket: SG\nrequest_id: fixed\n",
        );
        assert_eq!(config.base_url(), "https://rest.lalamove.com");

        let client_config = config.client_config();
        assert_eq!(client_config.market, "SG");
        assert_eq!(client_config.request_id.as_deref(), Some("fixed"));

        let overridden = parse("api_key: k\napi_secret: s\nbase_url: http://127.0.0.1:9000\n");
        assert_eq!(overridden.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let config = parse("api_key: ' '\napi_secret: s\n");
        assert!(config.validate().is_err());
    }
}
