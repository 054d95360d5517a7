//! Search store configuration

use serde::{Deserialize, Serialize};

/// Elasticsearch connection and index configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Base URL of the Elasticsearch cluster
    #[serde(default = "default_url")]
    pub url: String,

    /// Index (or alias) holding alert documents
    #[serde(default = "default_alerts_index")]
    pub alerts_index: String,

    /// Index (or alias) holding one document per information block
    #[serde(default = "default_infos_index")]
    pub infos_index: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Basic auth username
    #[serde(default)]
    pub username: Option<String>,

    /// Name of the environment variable holding the basic auth password
    #[serde(default)]
    pub password_env: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            alerts_index: default_alerts_index(),
            infos_index: default_infos_index(),
            timeout_secs: default_timeout_secs(),
            username: None,
            password_env: None,
        }
    }
}

fn default_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_alerts_index() -> String {
    "alerts".to_string()
}

fn default_infos_index() -> String {
    "infos".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    pub fn alerts_index(mut self, index: impl Into<String>) -> Self {
        self.config.alerts_index = index.into();
        self
    }

    pub fn infos_index(mut self, index: impl Into<String>) -> Self {
        self.config.infos_index = index.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password_env: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self.config.password_env = Some(password_env.into());
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
