use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shared_types::OrganisationId;
use time::macros::datetime;
use tokio::sync::oneshot;

use crate::config::core_config::ListConfig;
use crate::model::entity::ListEntity;
use crate::model::list_query::{PageRequest, PageResponse, ScopeContext};
use crate::model::organisation::{
    CreateOrganisationRequest, Organisation, UpdateOrganisationRequest,
};
use crate::port::error::PortError;
use crate::port::fetch_port::FetchPort;
use crate::port::mutation_port::MutationPort;
use crate::provider::query_cache::QueryCache;
use crate::service::entity_list::{EntityListController, ListPorts};

mockall::mock! {
    pub OrganisationMutations {}

    #[async_trait::async_trait]
    impl MutationPort<Organisation> for OrganisationMutations {
        async fn create(&self, request: CreateOrganisationRequest) -> Result<Organisation, PortError>;
        async fn update(
            &self,
            id: &OrganisationId,
            request: UpdateOrganisationRequest,
        ) -> Result<Organisation, PortError>;
        async fn delete(&self, id: &OrganisationId) -> Result<(), PortError>;
        async fn bulk_delete(&self, ids: &[OrganisationId]) -> Result<(), PortError>;
    }
}

pub fn dummy_organisation(name: &str) -> Organisation {
    Organisation {
        id: OrganisationId::new_v4(),
        name: name.to_string(),
        code: name.to_uppercase(),
        email: None,
        phone: None,
        is_active: true,
        created_date: datetime!(2024-01-01 0:00 UTC),
    }
}

pub fn dummy_organisations(count: usize) -> Vec<Organisation> {
    (1..=count)
        .map(|index| dummy_organisation(&format!("Organisation {index}")))
        .collect()
}

/// In-memory backend: filters by case-insensitive name search and paginates in
/// insertion order. Requests for a gated search term block until released.
#[derive(Default)]
pub struct FakeFetchPort {
    records: Mutex<Vec<Organisation>>,
    requests: Mutex<Vec<PageRequest>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    failure: Mutex<Option<PortError>>,
}

impl FakeFetchPort {
    pub fn new(records: Vec<Organisation>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
            ..Default::default()
        })
    }

    pub fn gate(&self, search: &str) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.gates.lock().unwrap().insert(search.to_string(), gate);
        release
    }

    pub fn fail_with(&self, error: Option<PortError>) {
        *self.failure.lock().unwrap() = error;
    }

    pub fn set_records(&self, records: Vec<Organisation>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl FetchPort<Organisation> for FakeFetchPort {
    async fn fetch_page(&self, request: PageRequest) -> Result<PageResponse<Organisation>, PortError> {
        self.requests.lock().unwrap().push(request.clone());

        let gate = self.gates.lock().unwrap().remove(&request.search);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }

        let search = request.search.to_lowercase();
        let matching: Vec<Organisation> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&search))
            .cloned()
            .collect();

        let page_size = request.page_size as usize;
        let data = matching
            .iter()
            .skip(request.page_index as usize * page_size)
            .take(page_size)
            .cloned()
            .collect();

        Ok(PageResponse {
            data,
            count: matching.len() as u64,
        })
    }
}

pub fn list_config() -> ListConfig {
    ListConfig::default()
}

pub fn organisation_controller(
    fetch: Arc<FakeFetchPort>,
    mutations: MockOrganisationMutations,
    config: ListConfig,
) -> EntityListController<Organisation> {
    EntityListController::new(
        ListPorts {
            fetch,
            mutation: Arc::new(mutations),
            cache: Arc::new(QueryCache::new(config.stale_time, config.cache_size)),
            invalidators: vec![],
        },
        config,
        ScopeContext::new(),
    )
}

pub fn names(items: &[Organisation]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

pub fn ids(items: &[Organisation]) -> Vec<<Organisation as ListEntity>::Id> {
    items.iter().map(|item| item.id).collect()
}
