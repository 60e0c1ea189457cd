// 🚪 Query Endpoint
// Validation → lookup → response payload. Transport-agnostic: the HTTP
// server and the CLI both go through `handle`.

use crate::lookup::LookupService;
use crate::record::Record;
use crate::validation::{validate, QueryKind, ValidationError};
use serde::Serialize;

pub const NOT_FOUND_MESSAGE: &str = "No se encontró el RUC proporcionado. Verifique el número o intente nuevamente desde la plataforma oficial de SUNAT.";

pub const NAME_SEARCH_DISCLAIMER: &str = "La búsqueda por razón social en modo demo recorre un conjunto de registros de muestra. Para resultados oficiales use la consulta directa de SUNAT.";

/// Raw query parameters as they arrive (`?type=ruc&value=...`)
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// `type` parameter
    pub kind: Option<String>,
    pub value: Option<String>,
}

impl QueryParams {
    pub fn new(kind: Option<&str>, value: Option<&str>) -> Self {
        QueryParams {
            kind: kind.map(str::to_string),
            value: value.map(str::to_string),
        }
    }

    /// Build from decoded `key=value` pairs; the first occurrence of a key wins
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = QueryParams::default();
        for (key, value) in pairs {
            match key.as_str() {
                "type" if params.kind.is_none() => params.kind = Some(value),
                "value" if params.value.is_none() => params.value = Some(value),
                _ => {}
            }
        }
        params
    }
}

/// Response payload; serializes to the body, `status()` gives the HTTP status
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Invalid {
        errors: Vec<String>,
    },
    NotFound {
        message: String,
    },
    Found {
        record: Record,
    },
    Matches {
        records: Vec<Record>,
        total: usize,
        disclaimer: String,
    },
}

impl QueryResponse {
    pub fn status(&self) -> u16 {
        match self {
            QueryResponse::Invalid { .. } => 400,
            QueryResponse::NotFound { .. } => 404,
            QueryResponse::Found { .. } | QueryResponse::Matches { .. } => 200,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == 200
    }

    fn invalid(error: ValidationError) -> Self {
        QueryResponse::Invalid {
            errors: vec![error.to_string()],
        }
    }
}

/// Run one query end to end. Never fails; every outcome is a response.
pub async fn handle(service: &LookupService, params: &QueryParams) -> QueryResponse {
    let raw_value = params.value.as_deref().unwrap_or("");

    let kind = match QueryKind::parse(params.kind.as_deref()) {
        Ok(kind) => kind,
        Err(e) => {
            tracing::debug!(kind = ?params.kind, "Rejected query type");
            // Value problems are reported ahead of a bad type
            let reason = validate(QueryKind::Name, raw_value).err().unwrap_or(e);
            return QueryResponse::invalid(reason);
        }
    };

    let value = match validate(kind, raw_value) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(kind = kind.as_str(), reason = %e, "Rejected query value");
            return QueryResponse::invalid(e);
        }
    };

    tracing::debug!(kind = kind.as_str(), value = %value, "Handling query");

    match kind {
        QueryKind::Identifier => match service.lookup_by_ruc(&value).await {
            Some(record) => QueryResponse::Found { record },
            None => QueryResponse::NotFound {
                message: NOT_FOUND_MESSAGE.to_string(),
            },
        },
        QueryKind::Name => {
            let records = service.lookup_by_name(&value);
            QueryResponse::Matches {
                total: records.len(),
                records,
                disclaimer: NAME_SEARCH_DISCLAIMER.to_string(),
            }
        }
    }
}
