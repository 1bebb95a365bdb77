use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{redirect, Proxy};

use crate::config::HttpHelperConfig;
use crate::error::{HttpHelperError, Result};

/// The single blocking client shared by every request of an
/// [`HttpHelper`](crate::HttpHelper). Connection pooling is left to reqwest.
///
/// Redirects are never followed here; GET follows them itself and POST
/// reports them as a bad status.
#[derive(Debug, Clone)]
pub struct SharedHttpClient(Client);

impl SharedHttpClient {
    pub fn new(config: &HttpHelperConfig) -> Result<Self> {
        tracing::debug!("Creating HTTP client with settings: {:?}", config);
        // The blocking client has no separate read timeout; the per-request
        // timeout bounds the wait for response data instead.
        let mut builder = Client::builder()
            .use_rustls_tls()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .redirect(redirect::Policy::none());

        if let Some(proxy) = &config.proxy {
            let url = proxy.url();
            let proxy = Proxy::all(&url).map_err(|e| HttpHelperError::InvalidProxy {
                url: url.clone(),
                reason: e.to_string(),
            })?;
            builder = builder.proxy(proxy);
        } else {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| HttpHelperError::ClientBuild(e.to_string()))?;
        Ok(Self(client))
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.0.get(url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.0.post(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxySettings;

    #[test]
    fn test_build_client_with_default_proxy() {
        assert!(SharedHttpClient::new(&HttpHelperConfig::default()).is_ok());
    }

    #[test]
    fn test_build_client_without_proxy() {
        assert!(SharedHttpClient::new(&HttpHelperConfig::direct()).is_ok());
    }

    #[test]
    fn test_build_client_with_bad_proxy_host() {
        let config = HttpHelperConfig {
            proxy: Some(ProxySettings {
                host: "not a host".to_string(),
                port: 3128,
            }),
            ..HttpHelperConfig::default()
        };
        match SharedHttpClient::new(&config) {
            Err(HttpHelperError::InvalidProxy { url, .. }) => {
                assert_eq!(url, "http://not a host:3128");
            }
            other => panic!("Expected InvalidProxy, got {:?}", other.map(|_| ())),
        }
    }
}
