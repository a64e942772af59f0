//! Modelos del sistema
//!
//! Este módulo contiene la entidad Vehicle y el tipo de coordenadas usado
//! por el motor de distancias.

pub mod coordinates;
pub mod vehicle;

pub use coordinates::Coordinates;
pub use vehicle::{NewVehicle, Vehicle, VehicleRecord};
