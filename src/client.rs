//! Cliente HTTP para el almacén remoto de vehículos
//!
//! Implementa `VehicleDataAccess` sobre la API REST de vehículos (JSON).
//! Cada llamada comprueba el código de estado esperado antes de devolver.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::config::DirectoryConfig;
use crate::models::VehicleRecord;
use crate::repositories::VehicleDataAccess;
use crate::utils::errors::StoreError;

/// Cliente HTTP de la API de vehículos
pub struct HttpVehicleStore {
    client: Client,
    config: DirectoryConfig,
}

impl HttpVehicleStore {
    /// Crear nuevo cliente con el timeout de la configuración
    pub fn new(config: DirectoryConfig) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }
}

/// Convertir la respuesta en error si el estado no es el esperado
fn check_status(method: &'static str, response: Response, expected: StatusCode) -> Result<Response, StoreError> {
    let status = response.status();
    debug!("🌐 {} {} → {}", method, response.url(), status);

    if status != expected {
        return Err(StoreError::UnexpectedStatus {
            method,
            url: response.url().to_string(),
            status,
        });
    }
    Ok(response)
}

/// Como `check_status`, pero un 404 sobre un vehículo concreto es `NotFound`
fn check_item_status(
    method: &'static str,
    response: Response,
    expected: StatusCode,
    id: i64,
) -> Result<Response, StoreError> {
    if response.status() == StatusCode::NOT_FOUND {
        return Err(StoreError::NotFound { id });
    }
    check_status(method, response, expected)
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    response
        .json::<T>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait]
impl VehicleDataAccess for HttpVehicleStore {
    async fn fetch_all(&self) -> Result<Vec<VehicleRecord>, StoreError> {
        let response = self.client.get(self.config.resource_url()).send().await?;
        let response = check_status("GET", response, StatusCode::OK)?;
        decode(response).await
    }

    async fn fetch_one(&self, id: i64) -> Result<VehicleRecord, StoreError> {
        let response = self.client.get(self.config.item_url(id)).send().await?;
        let response = check_item_status("GET", response, StatusCode::OK, id)?;
        decode(response).await
    }

    async fn create(&self, record: VehicleRecord) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.config.resource_url())
            .json(&record)
            .send()
            .await?;
        check_status("POST", response, StatusCode::CREATED)?;
        Ok(())
    }

    async fn replace(&self, id: i64, record: VehicleRecord) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.config.item_url(id))
            .json(&record)
            .send()
            .await?;
        check_item_status("PUT", response, StatusCode::OK, id)?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let response = self.client.delete(self.config.item_url(id)).send().await?;
        check_item_status("DELETE", response, StatusCode::NO_CONTENT, id)?;
        Ok(())
    }
}
