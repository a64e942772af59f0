//! Coordenadas geográficas
//!
//! Par inmutable (latitud, longitud) usado como valor y como clave de
//! búsqueda: la igualdad y el hash se calculan sobre los bits de cada
//! componente.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::models::vehicle::{VehicleRecord, LATITUDE, LONGITUDE};
use crate::utils::errors::FieldError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Leer las coordenadas crudas de un registro remoto
    ///
    /// Acepta cualquier número JSON (también enteros); la regla `Float` solo
    /// se aplica al construir un `Vehicle`.
    pub fn from_record(record: &VehicleRecord) -> Result<Self, FieldError> {
        Ok(Self::new(
            component(record, LATITUDE.field_name())?,
            component(record, LONGITUDE.field_name())?,
        ))
    }

    fn key(&self) -> (u64, u64) {
        (normalized_bits(self.latitude), normalized_bits(self.longitude))
    }
}

fn component(record: &VehicleRecord, field: &'static str) -> Result<f64, FieldError> {
    record
        .get(field)
        .ok_or(FieldError::MissingField { field })?
        .as_f64()
        .ok_or(FieldError::Type {
            field,
            expected: "a number",
        })
}

/// 0.0 y -0.0 son la misma coordenada
fn normalized_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for Coordinates {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Coordinates {}

impl Hash for Coordinates {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}
