pub mod vehicle_repository;

pub use vehicle_repository::VehicleDataAccess;
