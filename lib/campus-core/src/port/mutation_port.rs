use super::error::PortError;
use crate::model::entity::ListEntity;

#[async_trait::async_trait]
pub trait MutationPort<E: ListEntity>: Send + Sync {
    async fn create(&self, request: E::CreateRequest) -> Result<E, PortError>;

    async fn update(&self, id: &E::Id, request: E::UpdateRequest) -> Result<E, PortError>;

    async fn delete(&self, id: &E::Id) -> Result<(), PortError>;

    async fn bulk_delete(&self, ids: &[E::Id]) -> Result<(), PortError>;
}
