//! Directorio de vehículos
//!
//! Operaciones CRUD sobre el almacén remoto y la consulta del vehículo más
//! cercano. Cada llamada vuelve a leer del almacén lo que necesita: no hay
//! cache ni estado compartido entre llamadas.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::{Coordinates, Vehicle, VehicleRecord};
use crate::repositories::VehicleDataAccess;
use crate::services::distance_service::{distance, find_closest};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::ValidationRules;

pub struct VehicleDirectory<S> {
    store: S,
    rules: ValidationRules,
}

impl<S: VehicleDataAccess> VehicleDirectory<S> {
    pub fn new(store: S, rules: ValidationRules) -> Self {
        Self { store, rules }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Listar todos los vehículos
    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let records = self.store.fetch_all().await?;
        info!("🚗 {} vehículos obtenidos", records.len());

        records.iter().map(|record| self.build(record)).collect()
    }

    /// Vehículos cuyos registros contienen todos los pares (campo, valor) del filtro
    pub async fn filter(&self, params: &VehicleRecord) -> AppResult<Vec<Vehicle>> {
        let records = self.store.fetch_all().await?;

        let vehicles = records
            .iter()
            .filter(|record| matches_filter(record, params))
            .map(|record| self.build(record))
            .collect::<AppResult<Vec<_>>>()?;

        info!("🔍 Filtro con {} campos: {} de {} vehículos", params.len(), vehicles.len(), records.len());
        Ok(vehicles)
    }

    /// Obtener un vehículo por id
    pub async fn get(&self, id: i64) -> AppResult<Vehicle> {
        let record = self.store.fetch_one(id).await?;
        self.build(&record)
    }

    /// Crear un vehículo; el almacén asigna el id
    pub async fn create(&self, vehicle: &Vehicle) -> AppResult<()> {
        let record = vehicle.to_record_without_id()?;
        self.store.create(record).await?;
        info!("✅ Vehículo creado: {}", vehicle);
        Ok(())
    }

    /// Reemplazar un vehículo existente
    pub async fn update(&self, vehicle: &Vehicle) -> AppResult<()> {
        let id = vehicle.id()?.ok_or(AppError::MissingId)?;
        let record = vehicle.to_record_without_id()?;
        self.store.replace(id, record).await?;
        info!("✅ Vehículo {} actualizado", id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.store.delete(id).await?;
        info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }

    /// Distancia en metros entre dos vehículos
    pub async fn distance(&self, first_id: i64, second_id: i64) -> AppResult<f64> {
        let first = self.store.fetch_one(first_id).await?;
        let second = self.store.fetch_one(second_id).await?;

        let meters = distance(
            Coordinates::from_record(&first)?,
            Coordinates::from_record(&second)?,
        );
        debug!("📏 Distancia {} ↔ {}: {:.1} m", first_id, second_id, meters);
        Ok(meters)
    }

    /// Vehículo más cercano al vehículo `id`
    ///
    /// Si dos vehículos comparten exactamente la misma coordenada solo se
    /// considera el último leído. Ante distancias iguales gana el primero en
    /// el orden del almacén.
    pub async fn nearest(&self, id: i64) -> AppResult<Vehicle> {
        let records = self.store.fetch_all().await?;

        let mut target = None;
        let mut others = CoordinateIndex::default();

        for record in records {
            let coordinates = Coordinates::from_record(&record)?;
            if record_id(&record) == Some(id) {
                target = Some(coordinates);
            } else if let Some(replaced) = others.insert(coordinates, record) {
                warn!(
                    "⚠️ Vehículo {:?} descartado: comparte coordenadas ({}, {})",
                    record_id(&replaced),
                    coordinates.latitude,
                    coordinates.longitude
                );
            }
        }

        let target = target.ok_or_else(|| AppError::NotFound(format!("target vehicle {} not found", id)))?;

        let (closest, min_distance) = find_closest(target, others.points());
        // La coordenada sale de others.points(): get() solo falla si no hubo candidatos
        let record = closest
            .and_then(|point| others.get(&point))
            .ok_or(AppError::NoCandidates)?;

        info!("📍 Vehículo más cercano a {}: {:?} a {:.1} m", id, record_id(record), min_distance);
        self.build(record)
    }

    fn build(&self, record: &VehicleRecord) -> AppResult<Vehicle> {
        Ok(Vehicle::from_record(record, self.rules)?)
    }
}

fn record_id(record: &VehicleRecord) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

fn matches_filter(record: &VehicleRecord, params: &VehicleRecord) -> bool {
    params.iter().all(|(key, value)| record.get(key) == Some(value))
}

/// Mapa coordenada → registro que conserva el orden de primera inserción
///
/// Insertar una coordenada repetida reemplaza el registro (gana el último)
/// sin mover su posición.
#[derive(Default)]
struct CoordinateIndex {
    order: Vec<Coordinates>,
    records: HashMap<Coordinates, VehicleRecord>,
}

impl CoordinateIndex {
    fn insert(&mut self, coordinates: Coordinates, record: VehicleRecord) -> Option<VehicleRecord> {
        let replaced = self.records.insert(coordinates, record);
        if replaced.is_none() {
            self.order.push(coordinates);
        }
        replaced
    }

    fn points(&self) -> &[Coordinates] {
        &self.order
    }

    fn get(&self, coordinates: &Coordinates) -> Option<&VehicleRecord> {
        self.records.get(coordinates)
    }
}
