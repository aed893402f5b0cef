//! Client configuration loading and resolution.

use std::time::Duration;

use url::Url;

use crate::error::TremorResult;

/// Address of the live site.
pub const DEFAULT_BASE_URL: &str = "http://www.tremorgames.com/";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "TREMOR_BASE_URL";

/// Environment variable holding a request timeout in whole seconds.
pub const TIMEOUT_ENV: &str = "TREMOR_TIMEOUT_SECS";

/// Settings for a [`TremorClient`](crate::TremorClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root every request path is resolved against. Always ends with `/`.
    pub base_url: Url,
    /// Per-request timeout. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Build a config for an explicit base URL.
    pub fn with_base_url(base_url: &str) -> TremorResult<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout: None,
        })
    }

    /// Resolve the configuration.
    ///
    /// Each setting is taken from the explicit value if present, then from
    /// the environment, then from the default.
    pub fn resolve(base_url: Option<&str>, timeout_secs: Option<u64>) -> TremorResult<Self> {
        let base_url = match base_url {
            Some(explicit) => normalize_base_url(explicit)?,
            None => match std::env::var(BASE_URL_ENV) {
                Ok(env_url) if !env_url.trim().is_empty() => normalize_base_url(&env_url)?,
                _ => normalize_base_url(DEFAULT_BASE_URL)?,
            },
        };

        let timeout_secs = timeout_secs.or_else(|| {
            std::env::var(TIMEOUT_ENV)
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
        });

        Ok(Self {
            base_url,
            timeout: timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Value for the `Host` header: host plus any explicit port.
    pub fn host_header(&self) -> String {
        let host = self.base_url.host_str().unwrap_or_default();
        match self.base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// Value for the `Origin` header: scheme and host, no trailing slash.
    pub fn origin(&self) -> String {
        format!("{}://{}", self.base_url.scheme(), self.host_header())
    }

    /// Value for the `Referer` header: the site root.
    pub fn referer(&self) -> String {
        format!("{}/", self.origin())
    }
}

fn normalize_base_url(raw: &str) -> TremorResult<Url> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Ok(Url::parse(trimmed)?)
    } else {
        Ok(Url::parse(&format!("{trimmed}/"))?)
    }
}
