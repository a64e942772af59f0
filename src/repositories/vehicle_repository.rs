use async_trait::async_trait;

use crate::models::VehicleRecord;
use crate::utils::errors::StoreError;

/// Acceso al almacén remoto de vehículos
///
/// Los registros viajan sin validar; la validación ocurre al construir
/// `Vehicle` en el directorio. `create` y `replace` reciben registros sin `id`.
#[async_trait]
pub trait VehicleDataAccess: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<VehicleRecord>, StoreError>;

    /// Falla con `StoreError::NotFound` si el id no existe
    async fn fetch_one(&self, id: i64) -> Result<VehicleRecord, StoreError>;

    async fn create(&self, record: VehicleRecord) -> Result<(), StoreError>;

    async fn replace(&self, id: i64, record: VehicleRecord) -> Result<(), StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
