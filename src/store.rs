// 🗂️ Record Store - read-only sample fixture
//
// Loaded once at startup (built-in set or CSV), never mutated afterwards.
// Shared across requests behind an Arc, so no locking is needed.

use crate::record::{is_ruc, DataSource, Record};
use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record {index}: RUC {ruc:?} is not 11 digits")]
    InvalidRuc { index: usize, ruc: String },

    #[error("duplicate RUC {0} in sample data")]
    DuplicateRuc(String),
}

// ============================================================================
// RECORD STORE
// ============================================================================

#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Insertion order is the order name searches report matches in
    records: Vec<Record>,
}

impl RecordStore {
    /// Build a store, enforcing the 11-digit and uniqueness invariants
    pub fn from_records(records: Vec<Record>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            if !record.has_valid_ruc() {
                return Err(StoreError::InvalidRuc {
                    index,
                    ruc: record.ruc.clone(),
                });
            }
            if !seen.insert(record.ruc.as_str()) {
                return Err(StoreError::DuplicateRuc(record.ruc.clone()));
            }
        }

        Ok(RecordStore { records })
    }

    /// Built-in demo fixture
    pub fn sample() -> Self {
        RecordStore {
            records: sample_records(),
        }
    }

    /// Load the fixture from a CSV file with a camelCase header row
    /// (`ruc,razonSocial,estado,condicion,direccion,departamento,provincia,distrito,refreshedAt`).
    ///
    /// Missing `refreshedAt` values are stamped with the load time.
    pub fn from_csv(csv_path: &Path) -> Result<Self> {
        let mut rdr = csv::Reader::from_path(csv_path)
            .with_context(|| format!("Failed to open sample CSV: {:?}", csv_path))?;

        let loaded_at = Utc::now();
        let mut records = Vec::new();

        for result in rdr.deserialize() {
            let row: SampleRow = result.context("Failed to deserialize sample record")?;
            records.push(row.into_record(loaded_at));
        }

        let store = RecordStore::from_records(records)
            .with_context(|| format!("Invalid sample data in {:?}", csv_path))?;

        tracing::info!(path = ?csv_path, records = store.len(), "Loaded sample store from CSV");
        Ok(store)
    }

    /// Exact match on RUC
    pub fn find_by_ruc(&self, ruc: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.ruc == ruc)
    }

    /// Case-insensitive substring match on razón social only.
    ///
    /// A blank fragment matches nothing.
    pub fn search_by_name(&self, fragment: &str) -> Vec<&Record> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Vec::new();
        }

        let needle = fragment.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.razon_social.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::sample()
    }
}

// ============================================================================
// CSV ROW
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SampleRow {
    ruc: String,
    razon_social: String,
    estado: String,
    condicion: String,
    direccion: String,
    #[serde(default)]
    departamento: Option<String>,
    #[serde(default)]
    provincia: Option<String>,
    #[serde(default)]
    distrito: Option<String>,
    #[serde(default)]
    refreshed_at: Option<DateTime<Utc>>,
}

impl SampleRow {
    fn into_record(self, loaded_at: DateTime<Utc>) -> Record {
        Record {
            ruc: self.ruc.trim().to_string(),
            razon_social: self.razon_social,
            estado: self.estado,
            condicion: self.condicion,
            direccion: self.direccion,
            departamento: non_blank(self.departamento),
            provincia: non_blank(self.provincia),
            distrito: non_blank(self.distrito),
            source: DataSource::Sample,
            refreshed_at: self.refreshed_at.unwrap_or(loaded_at),
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != "-"
    })
}

// ============================================================================
// BUILT-IN FIXTURE
// ============================================================================

fn sample_record(
    ruc: &str,
    razon_social: &str,
    condicion: &str,
    direccion: &str,
    location: [&str; 3],
) -> Record {
    let [departamento, provincia, distrito] = location;

    debug_assert!(is_ruc(ruc));
    Record {
        ruc: ruc.to_string(),
        razon_social: razon_social.to_string(),
        estado: "ACTIVO".to_string(),
        condicion: condicion.to_string(),
        direccion: direccion.to_string(),
        departamento: Some(departamento.to_string()),
        provincia: Some(provincia.to_string()),
        distrito: Some(distrito.to_string()),
        source: DataSource::Sample,
        refreshed_at: Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .unwrap_or_default(),
    }
}

fn sample_records() -> Vec<Record> {
    vec![
        sample_record(
            "20131312955",
            "SUPERINTENDENCIA NACIONAL DE ADUANAS Y DE ADMINISTRACION TRIBUTARIA - SUNAT",
            "HABIDO",
            "AV. GARCILASO DE LA VEGA NRO. 1472",
            ["LIMA", "LIMA", "LIMA"],
        ),
        sample_record(
            "20100047218",
            "BANCO DE CREDITO DEL PERU",
            "HABIDO",
            "CAL. CENTENARIO NRO. 156 URB. LAS LADERAS DE MELGAREJO",
            ["LIMA", "LIMA", "LA MOLINA"],
        ),
        sample_record(
            "20100130204",
            "BANCO BBVA PERU",
            "HABIDO",
            "AV. REPUBLICA DE PANAMA NRO. 3055",
            ["LIMA", "LIMA", "SAN ISIDRO"],
        ),
        sample_record(
            "20131257750",
            "SEGURO SOCIAL DE SALUD - ESSALUD",
            "HABIDO",
            "JR. DOMINGO CUETO NRO. 120",
            ["LIMA", "LIMA", "JESUS MARIA"],
        ),
        sample_record(
            "20100017491",
            "TELEFONICA DEL PERU S.A.A.",
            "HABIDO",
            "AV. AREQUIPA NRO. 1155",
            ["LIMA", "LIMA", "SANTA BEATRIZ"],
        ),
        sample_record(
            "20170072465",
            "SOCIEDAD MINERA CERRO VERDE S.A.A.",
            "HABIDO",
            "CAL. JACINTO IBAÑEZ NRO. 315 PQUE INDUSTRIAL",
            ["AREQUIPA", "AREQUIPA", "AREQUIPA"],
        ),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
