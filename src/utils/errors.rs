//! Sistema de manejo de errores
//!
//! Este módulo define los errores de validación de campos, los errores del
//! almacén remoto de vehículos y el error público del directorio.

use reqwest::StatusCode;
use thiserror::Error;
use validator::ValidationError;

/// Errores de validación de un campo
///
/// `Type` corresponde a un valor de categoría incorrecta y `Domain` a un valor
/// de la categoría correcta pero fuera de rango o mal formado.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("{field} must be {expected}")]
    Type {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{message}")]
    Domain {
        field: &'static str,
        code: String,
        message: String,
    },

    #[error("{field} has not been set")]
    Unset { field: &'static str },

    #[error("unexpected field '{field}'")]
    UnknownField { field: String },

    #[error("missing field '{field}'")]
    MissingField { field: &'static str },
}

impl FieldError {
    /// Construir un error de dominio a partir de un `ValidationError`
    pub fn domain(field: &'static str, error: ValidationError) -> Self {
        let message = match error.message {
            Some(message) => message.into_owned(),
            None => format!("{} is invalid ({})", field, error.code),
        };

        FieldError::Domain {
            field,
            code: error.code.into_owned(),
            message,
        }
    }

    /// Valor de categoría incorrecta (o ausente en el registro)
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            FieldError::Type { .. } | FieldError::MissingField { .. } | FieldError::UnknownField { .. }
        )
    }

    /// Valor fuera de dominio
    pub fn is_domain_error(&self) -> bool {
        matches!(self, FieldError::Domain { .. })
    }
}

/// Errores del almacén remoto de vehículos
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status code {status} for {method} {url}")]
    UnexpectedStatus {
        method: &'static str,
        url: String,
        status: StatusCode,
    },

    #[error("Vehicle with id '{id}' not found")]
    NotFound { id: i64 },

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Errores principales del directorio de vehículos
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] FieldError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No other vehicles available")]
    NoCandidates,

    #[error("Vehicle has no id")]
    MissingId,

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { id } => not_found_error("Vehicle", &id.to_string()),
            other => AppError::Store(other),
        }
    }
}

impl AppError {
    /// Código estable del tipo de error, para la superficie que envuelve al directorio
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(e) if e.is_domain_error() => "VALIDATION_DOMAIN_ERROR",
            AppError::Validation(_) => "VALIDATION_TYPE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::NoCandidates => "NO_CANDIDATES",
            AppError::MissingId => "MISSING_ID",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de configuración
pub fn config_error(message: &str) -> AppError {
    AppError::Config(message.to_string())
}
