use super::error::PortError;
use crate::model::entity::ListEntity;
use crate::model::list_query::{PageRequest, PageResponse};

/// Source of server-paginated pages for one entity collection.
#[async_trait::async_trait]
pub trait FetchPort<E: ListEntity>: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<PageResponse<E>, PortError>;
}
