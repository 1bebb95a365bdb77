use serde::Deserialize;

/// Connect timeout applied to every request, in milliseconds.
pub const CONNECT_TIMEOUT_MS: u64 = 4000;
/// Read (socket) timeout applied to every request, in milliseconds.
pub const READ_TIMEOUT_MS: u64 = 4000;
/// Forward proxy every request is routed through.
pub const PROXY_HOST: &str = "10.0.254.7";
pub const PROXY_PORT: u16 = 3128;
/// Redirects a GET follows before giving up. POST never follows redirects.
pub const MAX_REDIRECTS: usize = 50;
/// Charset used to encode parameters and decode response bodies when the caller doesn't pick one.
pub const DEFAULT_CHARSET: &str = "UTF-8";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProxySettings {
    pub host: String,
    pub port: u16,
}

impl ProxySettings {
    /// Proxy URL in the form accepted by `reqwest::Proxy::all`.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            host: PROXY_HOST.to_string(),
            port: PROXY_PORT,
        }
    }
}

/// Settings for the shared client, read once when an
/// [`HttpHelper`](crate::HttpHelper) is constructed.
///
/// Fields missing from a deserialized document keep their default value, so
/// an empty document yields the same client as [`HttpHelperConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpHelperConfig {
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    /// `None` sends requests directly.
    pub proxy: Option<ProxySettings>,
}

impl HttpHelperConfig {
    /// Same timeouts as the default, without a proxy.
    pub fn direct() -> Self {
        Self {
            proxy: None,
            ..Self::default()
        }
    }
}

impl Default for HttpHelperConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: CONNECT_TIMEOUT_MS,
            read_timeout_ms: READ_TIMEOUT_MS,
            proxy: Some(ProxySettings::default()),
        }
    }
}
