use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Top-level configuration, read from a TOML file.
///
/// ```toml
/// [server]
/// bind_addr = "0.0.0.0:7878"
///
/// [recommend]
/// default_page_size = 20
/// max_page_size = 100
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KithConfig {
    pub server: ServerConfig,
    pub recommend: RecommendConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 7878)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Page size used when a request does not name one.
    pub default_page_size: usize,
    /// Largest page size a request may ask for.
    pub max_page_size: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl RecommendConfig {
    /// Resolve a requested page size against the configured bounds.
    pub fn page_size(&self, requested: Option<usize>) -> ServerResult<usize> {
        let size = requested.unwrap_or(self.default_page_size);
        if size == 0 || size > self.max_page_size {
            return Err(ServerError::PageSize {
                requested: size,
                max: self.max_page_size,
            });
        }
        Ok(size)
    }
}

impl KithConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ServerResult<()> {
        let r = &self.recommend;
        if r.default_page_size == 0 || r.max_page_size == 0 {
            return Err(ServerError::Config("page sizes must be positive".into()));
        }
        if r.default_page_size > r.max_page_size {
            return Err(ServerError::Config(format!(
                "default_page_size {} exceeds max_page_size {}",
                r.default_page_size, r.max_page_size
            )));
        }
        Ok(())
    }
}
