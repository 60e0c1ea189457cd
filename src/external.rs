//! External registry client
//!
//! Single best-effort lookup against apis.net.pe, which proxies the SUNAT
//! taxpayer registry. There is no retry: any failure is reported as
//! [`ExternalResult::Unavailable`] and the caller decides what to do.

use crate::record::{DataSource, Record};
use crate::store::non_blank;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const APIS_NET_PE_BASE: &str = "https://api.apis.net.pe/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Outcome of one call to the authoritative source
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalResult {
    Found(Record),
    NotFound,
    /// Unreachable, timed out, or answered with something we cannot use
    Unavailable,
}

/// An authoritative registry that can resolve a RUC
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Resolve one RUC. `ruc` has already been validated.
    async fn fetch_by_ruc(&self, ruc: &str) -> ExternalResult;

    /// True for sources that never reach a registry
    fn is_offline(&self) -> bool {
        false
    }
}

// =============================================================================
// Offline source
// =============================================================================

/// Source used when external lookups are disabled; never reachable
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

#[async_trait]
impl RegistrySource for OfflineSource {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn fetch_by_ruc(&self, _ruc: &str) -> ExternalResult {
        ExternalResult::Unavailable
    }

    fn is_offline(&self) -> bool {
        true
    }
}

// =============================================================================
// apis.net.pe client
// =============================================================================

/// `GET /ruc?numero=` response body (fields we use)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApisNetPeRuc {
    nombre: String,
    numero_documento: String,
    #[serde(default)]
    estado: String,
    #[serde(default)]
    condicion: String,
    #[serde(default)]
    direccion: String,
    #[serde(default)]
    departamento: Option<String>,
    #[serde(default)]
    provincia: Option<String>,
    #[serde(default)]
    distrito: Option<String>,
}

impl ApisNetPeRuc {
    fn into_record(self) -> Record {
        Record {
            ruc: self.numero_documento.trim().to_string(),
            razon_social: self.nombre,
            estado: self.estado,
            condicion: self.condicion,
            direccion: self.direccion,
            departamento: non_blank(self.departamento),
            provincia: non_blank(self.provincia),
            distrito: non_blank(self.distrito),
            source: DataSource::External,
            refreshed_at: Utc::now(),
        }
    }
}

pub struct ApisNetPeClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApisNetPeClient {
    /// Create a client against `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ok(None) means the registry answered "no such RUC"
    async fn get_ruc(&self, ruc: &str) -> Result<Option<ApisNetPeRuc>> {
        let url = format!("{}/ruc", self.base_url);

        let mut request = self
            .http
            .get(&url)
            .query(&[("numero", ruc)])
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::UNPROCESSABLE_ENTITY {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "apis.net.pe error {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ));
        }

        let body = response
            .json::<ApisNetPeRuc>()
            .await
            .context("Failed to parse apis.net.pe response")?;

        Ok(Some(body))
    }
}

#[async_trait]
impl RegistrySource for ApisNetPeClient {
    fn name(&self) -> &'static str {
        "apis.net.pe"
    }

    async fn fetch_by_ruc(&self, ruc: &str) -> ExternalResult {
        match self.get_ruc(ruc).await {
            Ok(Some(body)) if body.numero_documento.trim() == ruc => {
                ExternalResult::Found(body.into_record())
            }
            Ok(Some(body)) => {
                tracing::warn!(
                    ruc,
                    returned = %body.numero_documento,
                    "apis.net.pe answered for a different RUC"
                );
                ExternalResult::NotFound
            }
            Ok(None) => ExternalResult::NotFound,
            Err(e) => {
                tracing::warn!(ruc, error = %format!("{:#}", e), "apis.net.pe unavailable");
                ExternalResult::Unavailable
            }
        }
    }
}
