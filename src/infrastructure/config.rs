use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of samples per series served by `/api/timeseries`
    #[serde(default = "default_rounds")]
    pub timeseries_rounds: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeseries_rounds: default_rounds(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardSettings {
    /// Where the headless dashboard fetches from; the local server when unset
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub self_check: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5050
}

fn default_rounds() -> usize {
    50
}

impl AppConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn api_base_url(&self) -> String {
        self.dashboard
            .api_base_url
            .clone()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", self.server.port))
    }
}

/// `config/dashboard.{toml,yaml,json}` if present, overridden by `DASHBOARD__SECTION__KEY` variables.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("");
        assert_eq!(config.bind_address(), "0.0.0.0:5050");
        assert_eq!(config.api_base_url(), "http://127.0.0.1:5050");
        assert_eq!(config.server.timeseries_rounds, 50);
        assert!(!config.dashboard.self_check);
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8081

            [dashboard]
            api_base_url = "http://metrics.internal:9000"
            self_check = true
            "#,
        );
        assert_eq!(config.bind_address(), "127.0.0.1:8081");
        assert_eq!(config.api_base_url(), "http://metrics.internal:9000");
        assert!(config.dashboard.self_check);
    }
}
