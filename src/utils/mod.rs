//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores y el sistema de campos validados.

pub mod errors;
pub mod validation;

pub use errors::{AppError, AppResult, FieldError, StoreError};
pub use validation::{Constraint, ConstraintKind, ValidatedField, ValidationRules};
