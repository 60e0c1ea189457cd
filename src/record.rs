// 🧾 Taxpayer Record - the unit every lookup returns
// Wire shape is camelCase to match what browser clients already consume

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// DATA SOURCE
// ============================================================================

/// Which path produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    /// Fetched live from the SUNAT registry through apis.net.pe
    #[serde(rename = "apis.net.pe")]
    External,

    /// Served from the in-memory demo fixture
    #[serde(rename = "sample")]
    Sample,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::External => "apis.net.pe",
            DataSource::Sample => "sample",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// 11-digit RUC - unique key
    pub ruc: String,

    /// Razón social (registered name)
    pub razon_social: String,

    /// Taxpayer status, e.g. ACTIVO
    pub estado: String,

    /// Domicile condition, e.g. HABIDO
    pub condicion: String,

    /// Fiscal address
    pub direccion: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departamento: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provincia: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distrito: Option<String>,

    pub source: DataSource,

    pub refreshed_at: DateTime<Utc>,
}

impl Record {
    /// True when `ruc` is exactly 11 ASCII digits
    pub fn has_valid_ruc(&self) -> bool {
        is_ruc(&self.ruc)
    }
}

/// Shape check for a RUC without going through the regex
pub(crate) fn is_ruc(value: &str) -> bool {
    value.len() == 11 && value.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// TESTS
// ============================================================================
