//! Directorio de vehículos
//!
//! Modelo de dominio para vehículos de una API REST remota: campos validados
//! en la entidad `Vehicle`, distancias geográficas (haversine) y la consulta
//! del vehículo más cercano.

pub mod client;
pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

pub use client::HttpVehicleStore;
pub use config::DirectoryConfig;
pub use models::{Coordinates, NewVehicle, Vehicle, VehicleRecord};
pub use repositories::VehicleDataAccess;
pub use services::{distance, find_closest, VehicleDirectory};
pub use utils::{AppError, AppResult, FieldError, StoreError, ValidationRules};
