//! Modelo de Vehicle
//!
//! Este módulo contiene la entidad `Vehicle`, cuyos atributos son todos
//! campos validados, y su representación como registro del almacén remoto
//! (`id, name, model, year, color, price, latitude, longitude`).

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::models::coordinates::Coordinates;
use crate::utils::errors::FieldError;
use crate::utils::validation::{Constraint, ConstraintKind, ValidatedField, ValidationRules};

/// Registro plano tal como lo entrega el almacén remoto
pub type VehicleRecord = Map<String, Value>;

pub const ID: Constraint = Constraint::bind("id", ConstraintKind::OptionalId);
pub const NAME: Constraint = Constraint::bind("name", ConstraintKind::String);
pub const MODEL: Constraint = Constraint::bind("model", ConstraintKind::String);
pub const YEAR: Constraint = Constraint::bind("year", ConstraintKind::Year);
pub const COLOR: Constraint = Constraint::bind("color", ConstraintKind::String);
pub const PRICE: Constraint = Constraint::bind("price", ConstraintKind::NonNegativeInteger);
pub const LATITUDE: Constraint = Constraint::bind("latitude", ConstraintKind::Float);
pub const LONGITUDE: Constraint = Constraint::bind("longitude", ConstraintKind::Float);

/// Campos declarados, en el orden del registro
pub const FIELDS: [Constraint; 8] = [ID, NAME, MODEL, YEAR, COLOR, PRICE, LATITUDE, LONGITUDE];

/// Datos de entrada para construir un vehículo
#[derive(Debug, Clone, Deserialize)]
pub struct NewVehicle {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: u64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Vehicle con todos sus atributos validados
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    rules: ValidationRules,
    id: ValidatedField<Option<i64>>,
    name: ValidatedField<String>,
    model: ValidatedField<String>,
    year: ValidatedField<i32>,
    color: ValidatedField<String>,
    price: ValidatedField<u64>,
    latitude: ValidatedField<f64>,
    longitude: ValidatedField<f64>,
}

impl Vehicle {
    fn unset(rules: ValidationRules) -> Self {
        Self {
            rules,
            id: ValidatedField::new(ID),
            name: ValidatedField::new(NAME),
            model: ValidatedField::new(MODEL),
            year: ValidatedField::new(YEAR),
            color: ValidatedField::new(COLOR),
            price: ValidatedField::new(PRICE),
            latitude: ValidatedField::new(LATITUDE),
            longitude: ValidatedField::new(LONGITUDE),
        }
    }

    /// Construir desde datos de usuario
    pub fn new(input: NewVehicle, rules: ValidationRules) -> Result<Self, FieldError> {
        let mut vehicle = Self::unset(rules);

        vehicle.id.write(input.id, &rules)?;
        vehicle.name.write(input.name, &rules)?;
        vehicle.model.write(input.model, &rules)?;
        vehicle.year.write(input.year, &rules)?;
        vehicle.color.write(input.color, &rules)?;
        vehicle.price.write(input.price, &rules)?;
        vehicle.latitude.write(input.latitude, &rules)?;
        vehicle.longitude.write(input.longitude, &rules)?;

        Ok(vehicle)
    }

    /// Construir desde un registro decodificado del almacén remoto
    ///
    /// Un `id` ausente equivale a `null`; cualquier otro campo ausente o una
    /// clave no declarada es un error.
    pub fn from_record(record: &VehicleRecord, rules: ValidationRules) -> Result<Self, FieldError> {
        if let Some(unknown) = record
            .keys()
            .find(|key| !FIELDS.iter().any(|c| c.field_name() == key.as_str()))
        {
            return Err(FieldError::UnknownField {
                field: unknown.clone(),
            });
        }

        let mut vehicle = Self::unset(rules);
        for constraint in FIELDS {
            let field = constraint.field_name();
            let value = match record.get(field) {
                Some(value) => value.clone(),
                None if constraint == ID => Value::Null,
                None => return Err(FieldError::MissingField { field }),
            };
            vehicle.set_field(field, value)?;
        }

        Ok(vehicle)
    }

    /// Asignar un campo por nombre, pasando por su validación
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        let rules = self.rules;

        match name {
            "id" => self.id.write_value(value, &rules),
            "name" => self.name.write_value(value, &rules),
            "model" => self.model.write_value(value, &rules),
            "year" => self.year.write_value(value, &rules),
            "color" => self.color.write_value(value, &rules),
            "price" => self.price.write_value(value, &rules),
            "latitude" => self.latitude.write_value(value, &rules),
            "longitude" => self.longitude.write_value(value, &rules),
            other => Err(FieldError::UnknownField {
                field: other.to_string(),
            }),
        }
    }

    /// Leer un campo por nombre
    pub fn get_field(&self, name: &str) -> Result<Value, FieldError> {
        match name {
            "id" => self.id.read_value(),
            "name" => self.name.read_value(),
            "model" => self.model.read_value(),
            "year" => self.year.read_value(),
            "color" => self.color.read_value(),
            "price" => self.price.read_value(),
            "latitude" => self.latitude.read_value(),
            "longitude" => self.longitude.read_value(),
            other => Err(FieldError::UnknownField {
                field: other.to_string(),
            }),
        }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn id(&self) -> Result<Option<i64>, FieldError> {
        self.id.read().copied()
    }

    pub fn name(&self) -> Result<&str, FieldError> {
        self.name.read().map(String::as_str)
    }

    pub fn model(&self) -> Result<&str, FieldError> {
        self.model.read().map(String::as_str)
    }

    pub fn year(&self) -> Result<i32, FieldError> {
        self.year.read().copied()
    }

    pub fn color(&self) -> Result<&str, FieldError> {
        self.color.read().map(String::as_str)
    }

    pub fn price(&self) -> Result<u64, FieldError> {
        self.price.read().copied()
    }

    pub fn latitude(&self) -> Result<f64, FieldError> {
        self.latitude.read().copied()
    }

    pub fn longitude(&self) -> Result<f64, FieldError> {
        self.longitude.read().copied()
    }

    pub fn coordinates(&self) -> Result<Coordinates, FieldError> {
        Ok(Coordinates::new(self.latitude()?, self.longitude()?))
    }

    /// Representación completa como registro
    pub fn to_record(&self) -> Result<VehicleRecord, FieldError> {
        FIELDS
            .iter()
            .map(|c| Ok((c.field_name().to_string(), self.get_field(c.field_name())?)))
            .collect()
    }

    /// Registro sin `id`, para crear o reemplazar en el almacén remoto
    pub fn to_record_without_id(&self) -> Result<VehicleRecord, FieldError> {
        let mut record = self.to_record()?;
        record.remove(ID.field_name());
        Ok(record)
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let describe = || -> Result<String, FieldError> {
            Ok(format!(
                "{} {} {} {} {}",
                self.name()?,
                self.model()?,
                self.year()?,
                self.color()?,
                self.price()?
            ))
        };

        match describe() {
            Ok(description) => write!(f, "<Vehicle: {}>", description),
            Err(_) => write!(f, "<Vehicle: incomplete>"),
        }
    }
}

impl Serialize for Vehicle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}
