use crate::catalog::MerchantScope;
use crate::error::{CatalogError, CatalogResult};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub merchant_scope: MerchantScope,
}

impl AppConfig {
    pub fn from_env() -> CatalogResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> CatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("PORT")
                    .unwrap_or_else(|| "8000".to_string())
                    .parse()
                    .map_err(|_| CatalogError::config("Invalid PORT value"))?,
            },
            catalog: CatalogConfig {
                merchant_scope: lookup("CATALOG_MERCHANT_SCOPE")
                    .map(|raw| raw.parse::<MerchantScope>())
                    .transpose()?
                    .unwrap_or_default(),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
