// 📐 Query Validation
// Checks raw query input before anything touches the store or the network

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Upper bound on the trimmed query value, in characters
pub const MAX_VALUE_CHARS: usize = 120;

static RUC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{11}$").unwrap());

// ============================================================================
// QUERY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryKind {
    /// Exact lookup by 11-digit RUC (wire name `ruc`)
    #[default]
    Identifier,
    /// Substring search by razón social (wire name `name`)
    Name,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Identifier => "ruc",
            QueryKind::Name => "name",
        }
    }

    /// Parse the `type` query parameter; absent means `ruc`
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw {
            None | Some("ruc") => Ok(QueryKind::Identifier),
            Some("name") => Ok(QueryKind::Name),
            Some(_) => Err(ValidationError::InvalidParameters),
        }
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Why a query was rejected. Display text is what callers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Ingrese un valor de búsqueda.")]
    ValueRequired,

    #[error("El valor ingresado es demasiado largo.")]
    ValueTooLong,

    #[error("Ingresa un RUC válido de 11 dígitos.")]
    InvalidRuc,

    #[error("Parámetros inválidos.")]
    InvalidParameters,
}

// ============================================================================
// VALIDATE
// ============================================================================

/// Trim `raw` and check it against the shape required by `kind`.
///
/// Returns the cleaned value on success.
pub fn validate(kind: QueryKind, raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    let chars = value.chars().count();

    if chars == 0 {
        return Err(ValidationError::ValueRequired);
    }
    if chars > MAX_VALUE_CHARS {
        return Err(ValidationError::ValueTooLong);
    }

    match kind {
        QueryKind::Identifier if !RUC_RE.is_match(value) => Err(ValidationError::InvalidRuc),
        _ => Ok(value.to_string()),
    }
}

// ============================================================================
// TESTS
// ============================================================================
