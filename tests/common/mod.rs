use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use vehicle_directory::{StoreError, VehicleDataAccess, VehicleRecord};

/// Almacén en memoria que imita a la API remota
#[derive(Default)]
pub struct InMemoryVehicleStore {
    records: Mutex<Vec<VehicleRecord>>,
}

impl InMemoryVehicleStore {
    pub fn with_records(records: Vec<VehicleRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn snapshot(&self) -> Vec<VehicleRecord> {
        self.records.lock().unwrap().clone()
    }
}

fn id_of(record: &VehicleRecord) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

#[async_trait]
impl VehicleDataAccess for InMemoryVehicleStore {
    async fn fetch_all(&self) -> Result<Vec<VehicleRecord>, StoreError> {
        Ok(self.snapshot())
    }

    async fn fetch_one(&self, id: i64) -> Result<VehicleRecord, StoreError> {
        self.snapshot()
            .into_iter()
            .find(|r| id_of(r) == Some(id))
            .ok_or(StoreError::NotFound { id })
    }

    async fn create(&self, mut record: VehicleRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let next_id = records.iter().filter_map(id_of).max().unwrap_or(0) + 1;
        record.insert("id".to_string(), json!(next_id));
        records.push(record);
        Ok(())
    }

    async fn replace(&self, id: i64, mut record: VehicleRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| id_of(r) == Some(id))
            .ok_or(StoreError::NotFound { id })?;
        record.insert("id".to_string(), json!(id));
        *slot = record;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| id_of(r) != Some(id));
        if records.len() == before {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}

pub fn record(id: i64, name: &str, latitude: f64, longitude: f64) -> VehicleRecord {
    json!({
        "id": id,
        "name": name,
        "model": "Camry",
        "year": 2020,
        "color": "red",
        "price": 20000,
        "latitude": latitude,
        "longitude": longitude
    })
    .as_object()
    .cloned()
    .unwrap()
}
