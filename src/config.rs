// ⚙️ Configuration - read once from the environment at startup

use crate::external::{ApisNetPeClient, OfflineSource, RegistrySource, APIS_NET_PE_BASE, DEFAULT_TIMEOUT_SECS};
use crate::lookup::LookupService;
use crate::store::RecordStore;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Server listen address (SUNAT_BIND_ADDR)
    pub bind_addr: String,

    /// Consult apis.net.pe at all (SUNAT_EXTERNAL_ENABLED)
    pub external_enabled: bool,

    /// apis.net.pe base URL (APIS_NET_PE_URL)
    pub external_base_url: String,

    /// Optional bearer token (APIS_NET_PE_TOKEN)
    pub external_token: Option<String>,

    /// Per-call timeout (SUNAT_EXTERNAL_TIMEOUT_SECS)
    pub external_timeout: Duration,

    /// Replace the built-in sample set (SUNAT_SAMPLE_CSV)
    pub sample_csv: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            external_enabled: true,
            external_base_url: APIS_NET_PE_BASE.to_string(),
            external_token: None,
            external_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sample_csv: None,
        }
    }
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key → value source; unset and blank values mean "default"
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(addr) = get("SUNAT_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Some(flag) = get("SUNAT_EXTERNAL_ENABLED") {
            config.external_enabled = parse_bool(&flag)
                .with_context(|| format!("Invalid SUNAT_EXTERNAL_ENABLED: {:?}", flag))?;
        }

        if let Some(url) = get("APIS_NET_PE_URL") {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("APIS_NET_PE_URL must be an http(s) URL, got {:?}", url);
            }
            config.external_base_url = url;
        }

        config.external_token = get("APIS_NET_PE_TOKEN");

        if let Some(secs) = get("SUNAT_EXTERNAL_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("Invalid SUNAT_EXTERNAL_TIMEOUT_SECS: {:?}", secs))?;
            if secs == 0 {
                bail!("SUNAT_EXTERNAL_TIMEOUT_SECS must be at least 1");
            }
            config.external_timeout = Duration::from_secs(secs);
        }

        config.sample_csv = get("SUNAT_SAMPLE_CSV").map(PathBuf::from);

        Ok(config)
    }

    /// Load the sample store this config points at
    pub fn load_store(&self) -> Result<RecordStore> {
        match &self.sample_csv {
            Some(path) => RecordStore::from_csv(path),
            None => Ok(RecordStore::sample()),
        }
    }

    /// Registry source this config selects
    pub fn registry_source(&self) -> Result<Arc<dyn RegistrySource>> {
        if !self.external_enabled {
            return Ok(Arc::new(OfflineSource));
        }

        let client = ApisNetPeClient::new(
            self.external_base_url.clone(),
            self.external_token.clone(),
            self.external_timeout,
        )?;
        Ok(Arc::new(client))
    }

    /// Wire store and registry into a ready service
    pub fn build_service(&self) -> Result<LookupService> {
        let store = self.load_store()?;
        let source = self.registry_source()?;

        tracing::info!(
            records = store.len(),
            source = source.name(),
            timeout_secs = self.external_timeout.as_secs(),
            "Lookup service ready"
        );

        Ok(LookupService::new(store, source))
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {:?}", other),
    }
}
