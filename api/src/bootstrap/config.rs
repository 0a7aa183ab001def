use std::net::{IpAddr, SocketAddr};

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_host: IpAddr,
    pub api_port: u16,
    /// Allowed CORS origin. Any origin is allowed when unset.
    pub frontend_url: Option<String>,
    pub seed_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: IpAddr::from([0, 0, 0, 0]),
            api_port: 8000,
            frontend_url: None,
            seed_data: false,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let api_host = match lookup("API_HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid API_HOST: {raw}"))?,
            None => defaults.api_host,
        };
        let api_port = match lookup("API_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid API_PORT: {raw}"))?,
            None => defaults.api_port,
        };
        let frontend_url = lookup("FRONTEND_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());
        let seed_data = match lookup("SEED_DATA") {
            Some(raw) => parse_bool(&raw).with_context(|| format!("invalid SEED_DATA: {raw}"))?,
            None => defaults.seed_data,
        };
        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            seed_data,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.api_host, self.api_port)
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {other}"),
    }
}
