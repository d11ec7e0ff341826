use std::fmt;

use clap::Args;

pub const DEFAULT_UPSTREAM_URL: &str = "https://webapi.legistar.com/v1";
pub const DEFAULT_CLIENT: &str = "nyc";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Proxy settings. Every flag falls back to an environment variable.
#[derive(Clone, Args)]
pub struct ProxyConfig {
    /// Address to bind.
    #[arg(long, env = "LEGISIGHT_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, env = "LEGISIGHT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Legistar Web API base URL, without the client segment.
    #[arg(long = "upstream-url", env = "LEGISTAR_BASE_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Legistar client (jurisdiction) name, e.g. `nyc`.
    #[arg(long, env = "LEGISTAR_CLIENT", default_value = DEFAULT_CLIENT)]
    pub client: String,

    /// Legistar read token appended to every upstream request.
    #[arg(long, env = "LEGISTAR_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Maximum number of matters returned by the list endpoints (`$top`).
    #[arg(long, env = "LEGISIGHT_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
}

impl ProxyConfig {
    /// Config with defaults for everything except upstream location and token.
    pub fn new(upstream_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            upstream_url: upstream_url.into(),
            client: DEFAULT_CLIENT.to_string(),
            token: token.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// Base of every upstream request: `<upstream_url>/<client>`.
    pub fn client_url(&self) -> String {
        format!(
            "{}/{}",
            self.upstream_url.trim_end_matches('/'),
            self.client.trim_matches('/')
        )
    }
}

// The token must never reach the logs.
impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("bind", &self.bind)
            .field("port", &self.port)
            .field("upstream_url", &self.upstream_url)
            .field("client", &self.client)
            .field("token", &"<redacted>")
            .field("page_size", &self.page_size)
            .finish()
    }
}
