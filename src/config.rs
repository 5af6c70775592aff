//! Server configuration from the environment: HOST, PORT, RUST_LOG.

/// Where to listen and how verbosely to log.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// env_logger filter used when RUST_LOG is unset.
    pub log_filter: String,
    /// Problems found while reading the environment. The logger is not running yet when
    /// the config is read, so the caller logs these once it is.
    pub warnings: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_filter: default_log_filter(),
            warnings: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Read HOST / PORT / RUST_LOG from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. An unparsable PORT falls back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(default_host);
        let mut warnings = Vec::new();
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warnings.push(format!(
                    "Ignoring invalid PORT {:?}, using {}",
                    raw,
                    default_port()
                ));
                default_port()
            }),
            None => default_port(),
        };
        let log_filter = lookup("RUST_LOG")
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(default_log_filter);
        Self {
            host,
            port,
            log_filter,
            warnings,
        }
    }
}
