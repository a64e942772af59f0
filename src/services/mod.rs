//! Services module
//!
//! Este módulo contiene la lógica de negocio: el motor de distancias
//! geográficas y el directorio de vehículos que lo usa.

pub mod distance_service;
pub mod vehicle_directory;

pub use distance_service::{distance, find_closest};
pub use vehicle_directory::VehicleDirectory;
