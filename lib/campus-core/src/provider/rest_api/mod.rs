//! REST binding of the fetch and mutation ports.
//!
//! Every entity collection lives under `{base}/{RESOURCE}`; pages are requested with
//! camelCase query parameters and returned as `{ "data": [...], "count": n }`.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

use super::http_client::{HttpClient, Method, RequestBuilder};
use crate::model::entity::ListEntity;
use crate::model::list_query::{PageRequest, PageResponse};
use crate::port::error::PortError;
use crate::port::fetch_port::FetchPort;
use crate::port::mutation_port::MutationPort;


const BULK_DELETE: &str = "bulk-delete";

#[derive(Serialize)]
struct BulkDeleteBody<'a, Id> {
    ids: &'a [Id],
}

pub struct RestEntityApi<E> {
    client: Arc<dyn HttpClient>,
    base_url: Url,
    bearer_token: Option<String>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: ListEntity> RestEntityApi<E> {
    pub fn new(client: Arc<dyn HttpClient>, base_url: Url, bearer_token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            bearer_token,
            _entity: PhantomData,
        }
    }

    fn url(&self, segments: &[&str]) -> Result<Url, PortError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortError::InvalidRequest(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(E::RESOURCE)
            .extend(segments);

        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = RequestBuilder::new(self.client.clone(), method, url);
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

fn page_url(mut url: Url, request: &PageRequest) -> Url {
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("pageIndex", &request.page_index.to_string())
            .append_pair("pageSize", &request.page_size.to_string());

        if !request.search.is_empty() {
            pairs.append_pair("search", &request.search);
        }
        if let Some(sort_by) = &request.sort_by {
            pairs.append_pair("sortBy", sort_by);
        }
        if let Some(sort_order) = request.sort_order {
            pairs.append_pair("sortOrder", sort_order.as_ref());
        }
        for (key, value) in request.scope.iter() {
            pairs.append_pair(key, value);
        }
    }

    url
}

#[async_trait::async_trait]
impl<E: ListEntity> FetchPort<E> for RestEntityApi<E> {
    async fn fetch_page(&self, request: PageRequest) -> Result<PageResponse<E>, PortError> {
        let url = page_url(self.url(&[])?, &request);

        let page = self
            .request(Method::Get, url)
            .send()
            .await?
            .error_for_status()?
            .json()?;

        Ok(page)
    }
}

#[async_trait::async_trait]
impl<E: ListEntity> MutationPort<E> for RestEntityApi<E> {
    async fn create(&self, request: E::CreateRequest) -> Result<E, PortError> {
        let url = self.url(&[])?;

        let created = self
            .request(Method::Post, url)
            .json(&request)?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        Ok(created)
    }

    async fn update(&self, id: &E::Id, request: E::UpdateRequest) -> Result<E, PortError> {
        let url = self.url(&[&id.to_string()])?;

        let updated = self
            .request(Method::Patch, url)
            .json(&request)?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        Ok(updated)
    }

    async fn delete(&self, id: &E::Id) -> Result<(), PortError> {
        let url = self.url(&[&id.to_string()])?;

        self.request(Method::Delete, url)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    async fn bulk_delete(&self, ids: &[E::Id]) -> Result<(), PortError> {
        let url = self.url(&[BULK_DELETE])?;

        self.request(Method::Post, url)
            .json(&BulkDeleteBody { ids })?
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
