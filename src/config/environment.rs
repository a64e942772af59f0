//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del almacén remoto de vehículos:
//! URL base, segmento del recurso y timeout del transporte.

use std::env;
use std::time::Duration;

use serde_json::Value;

use crate::utils::errors::{config_error, AppResult};
use crate::utils::validation::{Constraint, ConstraintKind, ValidationRules};

pub const DEFAULT_PATH_SEGMENT: &str = "vehicles";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const BASE_URL: Constraint = Constraint::bind("base_url", ConstraintKind::Url);

/// Configuración del directorio de vehículos
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    base_url: String,
    pub path_segment: String,
    pub timeout: Duration,
    pub rules: ValidationRules,
}

impl DirectoryConfig {
    /// Crear configuración con la URL base validada
    pub fn new(base_url: impl Into<String>, rules: ValidationRules) -> AppResult<Self> {
        let base_url = base_url.into();
        BASE_URL.check(&Value::String(base_url.clone()), &rules)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            path_segment: DEFAULT_PATH_SEGMENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rules,
        })
    }

    /// Cargar desde el entorno (`VEHICLE_API_URL`, `VEHICLE_API_PATH`, `VEHICLE_API_TIMEOUT_SECS`)
    pub fn from_env(rules: ValidationRules) -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok(), rules)
    }

    /// Cargar usando una función de búsqueda de variables
    pub fn from_lookup<F>(lookup: F, rules: ValidationRules) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("VEHICLE_API_URL").ok_or_else(|| config_error("VEHICLE_API_URL must be set"))?;
        let mut config = Self::new(base_url, rules)?;

        if let Some(path_segment) = lookup("VEHICLE_API_PATH") {
            config.path_segment = path_segment.trim_matches('/').to_string();
        }

        if let Some(timeout) = lookup("VEHICLE_API_TIMEOUT_SECS") {
            let seconds = timeout
                .parse()
                .map_err(|_| config_error("VEHICLE_API_TIMEOUT_SECS must be a valid number"))?;
            config.timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL de la colección de vehículos
    pub fn resource_url(&self) -> String {
        format!("{}/{}", self.base_url, self.path_segment)
    }

    /// URL de un vehículo concreto
    pub fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.resource_url(), id)
    }
}
