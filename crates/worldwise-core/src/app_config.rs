use crate::places::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Root of the key-addressed JSON document store, without a trailing slash.
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// IP-geolocation endpoint. `None` means no location capability.
    pub geolocation_url: Option<String>,
    pub default_center: Position,
}
