//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del almacén remoto de vehículos,
//! leída de variables de entorno.

pub mod environment;

pub use environment::*;
