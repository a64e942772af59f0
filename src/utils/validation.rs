//! Utilidades de validación
//!
//! Campos validados: cada atributo de una entidad se declara con un
//! `Constraint` (nombre + tipo de regla) y se guarda en un `ValidatedField`,
//! que valida el valor antes de almacenarlo. Un valor rechazado nunca
//! reemplaza al anterior.

use std::fmt::Display;

use chrono::{Datelike, Utc};
use lazy_static::lazy_static;
use num_traits::Zero;
use regex::Regex;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use validator::ValidationError;

use crate::utils::errors::FieldError;

/// Año del primer automóvil documentado
pub const MIN_YEAR: i32 = 1885;

lazy_static! {
    /// Año actual, leído una sola vez al arrancar el proceso
    static ref STARTUP_YEAR: i32 = Utc::now().year();

    static ref URL_REGEX: Regex = Regex::new(concat!(
        r"(?i)^(?:http|ftp)s?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|",
        r"localhost|",
        r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .unwrap();
}

/// Límites de las reglas de validación
///
/// `max_year` queda fijado al arrancar y no avanza si el proceso cruza un
/// cambio de año.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub min_year: i32,
    pub max_year: i32,
}

impl ValidationRules {
    pub fn new(max_year: i32) -> Self {
        Self {
            min_year: MIN_YEAR,
            max_year,
        }
    }

    /// Reglas con el año actual congelado al arrancar el proceso
    pub fn at_startup() -> Self {
        Self::new(*STARTUP_YEAR)
    }
}

/// Tipos de regla que puede llevar un campo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    String,
    NonNegativeInteger,
    Float,
    Year,
    OptionalId,
    Url,
}

impl ConstraintKind {
    fn expected(self) -> &'static str {
        match self {
            ConstraintKind::String | ConstraintKind::Url => "a string",
            ConstraintKind::NonNegativeInteger | ConstraintKind::Year => "an integer",
            ConstraintKind::Float => "a float",
            ConstraintKind::OptionalId => "an integer or empty",
        }
    }
}

/// Regla de validación ligada a un campo con nombre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    field_name: &'static str,
    kind: ConstraintKind,
}

impl Constraint {
    /// Ligar una regla a un campo (una vez, al definir la entidad)
    pub const fn bind(field_name: &'static str, kind: ConstraintKind) -> Self {
        Self { field_name, kind }
    }

    pub fn field_name(&self) -> &'static str {
        self.field_name
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Validar un valor: primero la categoría, después el dominio
    pub fn check(&self, value: &Value, rules: &ValidationRules) -> Result<(), FieldError> {
        let field = self.field_name;

        match self.kind {
            ConstraintKind::String => {
                self.require(value.is_string())?;
            }
            ConstraintKind::NonNegativeInteger => {
                let number = self.integer(value)?;
                validate_non_negative(number)
                    .map_err(|e| FieldError::domain(field, with_message(e, format!("{} cannot be negative", field))))?;
            }
            ConstraintKind::Float => {
                self.require(value.is_f64())?;
            }
            ConstraintKind::Year => {
                let year = self.integer(value)?;
                validate_year(year, rules).map_err(|e| FieldError::domain(field, e))?;
            }
            ConstraintKind::OptionalId => {
                if !value.is_null() {
                    self.integer(value)?;
                    // `integer` satura; un id debe caber en i64 sin saturar
                    if !value.is_i64() {
                        let mut error = ValidationError::new("range");
                        error.add_param("max".into(), &i64::MAX);
                        return Err(FieldError::domain(
                            field,
                            with_message(error, format!("{} is out of range", field)),
                        ));
                    }
                }
            }
            ConstraintKind::Url => {
                let url = value.as_str().ok_or_else(|| self.type_error())?;
                validate_url(url)
                    .map_err(|e| FieldError::domain(field, with_message(e, format!("{} is invalid URL", field))))?;
            }
        }

        Ok(())
    }

    fn require(&self, accepted: bool) -> Result<(), FieldError> {
        if accepted {
            Ok(())
        } else {
            Err(self.type_error())
        }
    }

    /// Entero del valor; los `u64` fuera de rango se saturan a `i64::MAX`
    fn integer(&self, value: &Value) -> Result<i64, FieldError> {
        if let Some(number) = value.as_i64() {
            Ok(number)
        } else if value.is_u64() {
            Ok(i64::MAX)
        } else {
            Err(self.type_error())
        }
    }

    fn type_error(&self) -> FieldError {
        FieldError::Type {
            field: self.field_name,
            expected: self.kind.expected(),
        }
    }
}

/// Atributo de una entidad protegido por un `Constraint`
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedField<T> {
    constraint: Constraint,
    value: Option<T>,
}

impl<T> ValidatedField<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Campo sin valor todavía
    pub fn new(constraint: Constraint) -> Self {
        Self {
            constraint,
            value: None,
        }
    }

    /// Valor actual; falla si el campo nunca fue asignado
    pub fn read(&self) -> Result<&T, FieldError> {
        self.value.as_ref().ok_or(FieldError::Unset {
            field: self.constraint.field_name,
        })
    }

    /// Valor actual en forma dinámica
    pub fn read_value(&self) -> Result<Value, FieldError> {
        serde_json::to_value(self.read()?).map_err(|_| self.constraint.type_error())
    }

    /// Asignar un valor tipado, validándolo antes de guardarlo
    pub fn write(&mut self, value: T, rules: &ValidationRules) -> Result<(), FieldError> {
        let raw = serde_json::to_value(&value).map_err(|_| self.constraint.type_error())?;
        self.constraint.check(&raw, rules)?;
        self.value = Some(value);
        Ok(())
    }

    /// Asignar un valor dinámico (p. ej. decodificado del almacén remoto)
    pub fn write_value(&mut self, value: Value, rules: &ValidationRules) -> Result<(), FieldError> {
        self.constraint.check(&value, rules)?;
        let typed = serde_json::from_value(value).map_err(|_| self.constraint.type_error())?;
        self.value = Some(typed);
        Ok(())
    }
}

fn with_message(mut error: ValidationError, message: String) -> ValidationError {
    error.message = Some(message.into());
    error
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + Display + Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar el año de fabricación contra `[min_year, max_year]`
pub fn validate_year(year: i64, rules: &ValidationRules) -> Result<(), ValidationError> {
    let min = i64::from(rules.min_year);
    let max = i64::from(rules.max_year);

    validate_range(year, min, max).map_err(|error| {
        let message = if year < min {
            format!(
                "The year of manufacture is less than the first documented car: {}",
                rules.min_year
            )
        } else {
            format!(
                "The year of manufacture is greater than the current year: {}",
                rules.max_year
            )
        };
        with_message(error, message)
    })
}

/// Validar formato de URL (http/https/ftp/ftps)
pub fn validate_url(value: &str) -> Result<(), ValidationError> {
    if !URL_REGEX.is_match(value) {
        let mut error = ValidationError::new("url");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PRICE: Constraint = Constraint::bind("price", ConstraintKind::NonNegativeInteger);
    const YEAR: Constraint = Constraint::bind("year", ConstraintKind::Year);
    const URL: Constraint = Constraint::bind("base_url", ConstraintKind::Url);

    fn rules() -> ValidationRules {
        ValidationRules::new(2024)
    }

    #[test]
    fn test_startup_rules_are_frozen() {
        let first = ValidationRules::at_startup();
        let second = ValidationRules::at_startup();
        assert_eq!(first, second);
        assert_eq!(first.min_year, MIN_YEAR);
        assert!(first.max_year >= 2024);
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5, 1, 10).is_ok());
        assert!(validate_range(0, 1, 10).is_err());
        assert!(validate_range(15, 1, 10).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0).is_ok());
        assert!(validate_non_negative(5).is_ok());
        assert!(validate_non_negative(-1).is_err());
    }

    #[test]
    fn test_year_bounds() {
        let rules = rules();
        assert!(YEAR.check(&json!(1885), &rules).is_ok());
        assert!(YEAR.check(&json!(2024), &rules).is_ok());

        let too_old = YEAR.check(&json!(1884), &rules).unwrap_err();
        assert!(too_old.is_domain_error());
        assert!(too_old.to_string().contains("first documented car: 1885"));

        let too_new = YEAR.check(&json!(2025), &rules).unwrap_err();
        assert!(too_new.is_domain_error());
        assert!(too_new.to_string().contains("current year: 2024"));

        assert!(YEAR.check(&json!(u64::MAX), &rules).unwrap_err().is_domain_error());
        assert!(YEAR.check(&json!("2020"), &rules).unwrap_err().is_type_error());
        assert!(YEAR.check(&json!(2020.0), &rules).unwrap_err().is_type_error());
    }

    #[test]
    fn test_non_negative_integer() {
        let rules = rules();
        assert!(PRICE.check(&json!(0), &rules).is_ok());
        assert!(PRICE.check(&json!(u64::MAX), &rules).is_ok());

        for negative in [-1, -100, i64::MIN] {
            let error = PRICE.check(&json!(negative), &rules).unwrap_err();
            assert!(error.is_domain_error());
            assert_eq!(error.to_string(), "price cannot be negative");
        }

        for wrong in [json!(1.5), json!("10"), json!(null), json!([1])] {
            assert!(PRICE.check(&wrong, &rules).unwrap_err().is_type_error());
        }
    }

    #[test]
    fn test_float_rejects_integers() {
        let latitude = Constraint::bind("latitude", ConstraintKind::Float);
        assert!(latitude.check(&json!(55.75), &rules()).is_ok());
        assert!(latitude.check(&json!(55), &rules()).unwrap_err().is_type_error());
    }

    #[test]
    fn test_optional_id() {
        let id = Constraint::bind("id", ConstraintKind::OptionalId);
        assert!(id.check(&json!(null), &rules()).is_ok());
        assert!(id.check(&json!(3), &rules()).is_ok());
        assert!(id.check(&json!(-3), &rules()).is_ok());
        assert!(id.check(&json!("3"), &rules()).unwrap_err().is_type_error());
        assert!(id.check(&json!(3.0), &rules()).unwrap_err().is_type_error());
    }

    #[test]
    fn test_optional_id_beyond_i64_is_rejected_by_check() {
        let id = Constraint::bind("id", ConstraintKind::OptionalId);
        let too_big = json!(u64::MAX);

        let error = id.check(&too_big, &rules()).unwrap_err();
        assert!(error.is_domain_error());
        assert_eq!(error.to_string(), "id is out of range");

        let mut field: ValidatedField<Option<i64>> = ValidatedField::new(id);
        field.write(Some(7), &rules()).unwrap();
        assert_eq!(field.write_value(too_big, &rules()), Err(error));
        assert_eq!(field.read(), Ok(&Some(7)));
    }

    #[test]
    fn test_url() {
        let rules = rules();
        for valid in [
            "https://example.com/api",
            "http://localhost:8000",
            "HTTP://EXAMPLE.COM",
            "ftp://192.168.0.1/files?x=1",
            "ftps://sub.domain.example.org:21/",
        ] {
            assert!(URL.check(&json!(valid), &rules).is_ok(), "{}", valid);
        }

        let malformed = URL.check(&json!("not-a-url"), &rules).unwrap_err();
        assert!(malformed.is_domain_error());
        assert_eq!(malformed.to_string(), "base_url is invalid URL");

        assert!(URL.check(&json!("https://exa mple.com"), &rules).is_err());
        assert!(URL.check(&json!(123), &rules).unwrap_err().is_type_error());
    }

    #[test]
    fn test_field_read_before_write_fails() {
        let field: ValidatedField<u64> = ValidatedField::new(PRICE);
        assert_eq!(field.read(), Err(FieldError::Unset { field: "price" }));
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let rules = rules();
        let mut field: ValidatedField<i32> = ValidatedField::new(YEAR);
        field.write(2000, &rules).unwrap();

        assert!(field.write(1800, &rules).is_err());
        assert!(field.write_value(json!("1999"), &rules).is_err());
        assert_eq!(field.read(), Ok(&2000));

        field.write_value(json!(2010), &rules).unwrap();
        assert_eq!(field.read_value(), Ok(json!(2010)));
    }
}
