use std::net::SocketAddr;

use anyhow::{Context, anyhow};
use axum_extra::extract::cookie::Key;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub tmdb_access_token: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub tmdb_rps: u32,
    pub secret_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = var("PORT").unwrap_or_else(|| "3000".to_string()).parse().context("PORT")?;

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://movies.db?mode=rwc".to_string());

        let tmdb_access_token = var("TMDB_ACCESS_TOKEN").unwrap_or_default();
        let tmdb_base_url =
            var("TMDB_BASE_URL").unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_base_url = var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|| "https://image.tmdb.org/t/p/original".to_string());

        let tmdb_rps: u32 = match var("TMDB_RPS") {
            Some(s) => s.parse().context("TMDB_RPS")?,
            None => 4,
        };

        let secret_key = var("SECRET_KEY").filter(|s| !s.trim().is_empty());

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            tmdb_access_token,
            tmdb_base_url,
            tmdb_image_base_url,
            tmdb_rps,
            secret_key,
        })
    }

    /// Key used to sign the flash cookie. Without `SECRET_KEY` a fresh key is
    /// generated, so pending flash messages do not survive a restart.
    pub fn cookie_key(&self) -> anyhow::Result<Key> {
        match &self.secret_key {
            Some(secret) => Key::try_from(secret.as_bytes())
                .map_err(|_| anyhow!("SECRET_KEY must be at least 64 bytes long")),
            None => {
                tracing::warn!("no SECRET_KEY provided, generating a per-process signing key");
                Ok(Key::generate())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.database_url, "sqlite://movies.db?mode=rwc");
        assert_eq!(config.tmdb_base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb_rps, 4);
        assert!(config.tmdb_access_token.is_empty());
        assert!(config.secret_key.is_none());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn short_secret_key_is_rejected() {
        let config = config_from(&[("SECRET_KEY", "too-short")]).unwrap();
        assert!(config.cookie_key().is_err());
    }

    #[test]
    fn long_secret_key_is_accepted() {
        let secret = "k".repeat(64);
        let config = config_from(&[("SECRET_KEY", secret.as_str())]).unwrap();
        assert!(config.cookie_key().is_ok());
    }

    #[test]
    fn blank_secret_key_falls_back_to_generated() {
        let config = config_from(&[("SECRET_KEY", "   ")]).unwrap();
        assert!(config.secret_key.is_none());
        assert!(config.cookie_key().is_ok());
    }
}
