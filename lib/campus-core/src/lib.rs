//! List core of the campus administration client.
//!
//! [`CampusCore`] wires the REST backend, the shared page caches and the
//! configuration into per-screen [`EntityListController`]s.

use std::sync::Arc;

use shared_types::{BranchId, OrganisationId};
use url::Url;

use crate::config::core_config::CoreConfig;
use crate::model::academic_year::AcademicYear;
use crate::model::branch::Branch;
use crate::model::class_fee_mapping::ClassFeeMapping;
use crate::model::department::Department;
use crate::model::designation::Designation;
use crate::model::division::Division;
use crate::model::entity::ListEntity;
use crate::model::exam_cycle::ExamCycle;
use crate::model::fee_group::FeeGroup;
use crate::model::fee_head::FeeHead;
use crate::model::list_query::ScopeContext;
use crate::model::organisation::Organisation;
use crate::model::stream::Stream;
use crate::model::student_enrollment::StudentEnrollment;
use crate::provider::http_client::HttpClient;
use crate::provider::http_client::reqwest_client::ReqwestClient;
use crate::provider::query_cache::{QueryCacheRegistry, QueryInvalidator};
use crate::provider::rest_api::RestEntityApi;
use crate::service::entity_list::{EntityListController, ListPorts};
use crate::service::error::ServiceError;

pub mod config;
pub mod model;
pub mod port;
pub mod provider;
pub mod service;

#[cfg(test)]
mod test;

pub struct CampusCore {
    config: CoreConfig,
    client: Arc<dyn HttpClient>,
    base_url: Url,
    bearer_token: Option<String>,
    caches: QueryCacheRegistry,
}

impl CampusCore {
    /// Builds a core talking to `config.backend` through `reqwest`.
    pub fn new(config: CoreConfig, bearer_token: Option<String>) -> Result<Self, ServiceError> {
        let backend = config
            .backend
            .as_ref()
            .ok_or(ServiceError::MissingBackendConfig)?;

        let client = match backend.request_timeout {
            Some(timeout) => ReqwestClient::with_timeout(timeout)
                .map_err(|e| ServiceError::HttpClient(e.to_string()))?,
            None => ReqwestClient::default(),
        };

        Self::with_client(config, Arc::new(client), bearer_token)
    }

    pub fn with_client(
        config: CoreConfig,
        client: Arc<dyn HttpClient>,
        bearer_token: Option<String>,
    ) -> Result<Self, ServiceError> {
        let base_url = config
            .backend
            .as_ref()
            .ok_or(ServiceError::MissingBackendConfig)?
            .base_url
            .clone();
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidBackendUrl(base_url.to_string()));
        }

        Ok(Self {
            config,
            client,
            base_url,
            bearer_token,
            caches: QueryCacheRegistry::new(),
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Replaces the token sent with requests of controllers created afterwards.
    pub fn set_bearer_token(&mut self, bearer_token: Option<String>) {
        self.bearer_token = bearer_token;
    }

    /// Drops cached pages of an entity family for every controller of this core.
    pub fn invalidate_family(&self, family: &str) -> usize {
        self.caches.invalidate_family(family)
    }

    /// Controller for any entity collection, scoped by `scope`.
    pub fn list_controller<E: ListEntity>(&self, scope: ScopeContext) -> EntityListController<E> {
        self.list_controller_with(scope, vec![])
    }

    /// Like [`Self::list_controller`]; mutations additionally notify `invalidators`.
    pub fn list_controller_with<E: ListEntity>(
        &self,
        scope: ScopeContext,
        invalidators: Vec<Arc<dyn QueryInvalidator>>,
    ) -> EntityListController<E> {
        let api = Arc::new(RestEntityApi::<E>::new(
            self.client.clone(),
            self.base_url.clone(),
            self.bearer_token.clone(),
        ));

        EntityListController::new(
            ListPorts {
                fetch: api.clone(),
                mutation: api,
                cache: self.caches.cache_for::<E>(&self.config),
                invalidators,
            },
            self.config.list_config_for(E::RESOURCE),
            scope,
        )
    }

    pub fn organisation_list(&self) -> EntityListController<Organisation> {
        self.list_controller(ScopeContext::new())
    }

    pub fn branch_list(&self, organisation_id: OrganisationId) -> EntityListController<Branch> {
        self.list_controller(ScopeContext::new().with_organisation(organisation_id))
    }

    pub fn designation_list(
        &self,
        organisation_id: OrganisationId,
    ) -> EntityListController<Designation> {
        self.list_controller(ScopeContext::new().with_organisation(organisation_id))
    }

    pub fn academic_year_list(
        &self,
        organisation_id: OrganisationId,
    ) -> EntityListController<AcademicYear> {
        self.list_controller(ScopeContext::new().with_organisation(organisation_id))
    }

    pub fn division_list(
        &self,
        organisation_id: OrganisationId,
        branch_id: BranchId,
    ) -> EntityListController<Division> {
        self.list_controller(branch_scope(organisation_id, branch_id))
    }

    pub fn department_list(
        &self,
        organisation_id: OrganisationId,
        branch_id: BranchId,
    ) -> EntityListController<Department> {
        self.list_controller(branch_scope(organisation_id, branch_id))
    }

    pub fn stream_list(
        &self,
        organisation_id: OrganisationId,
        branch_id: BranchId,
    ) -> EntityListController<Stream> {
        self.list_controller(branch_scope(organisation_id, branch_id))
    }

    pub fn exam_cycle_list(
        &self,
        organisation_id: OrganisationId,
        branch_id: BranchId,
    ) -> EntityListController<ExamCycle> {
        self.list_controller(branch_scope(organisation_id, branch_id))
    }

    pub fn fee_group_list(
        &self,
        organisation_id: OrganisationId,
        branch_id: BranchId,
    ) -> EntityListController<FeeGroup> {
        self.list_controller(branch_scope(organisation_id, branch_id))
    }

    pub fn fee_head_list(
        &self,
        organisation_id: OrganisationId,
        branch_id: BranchId,
    ) -> EntityListController<FeeHead> {
        self.list_controller(branch_scope(organisation_id, branch_id))
    }

    pub fn class_fee_mapping_list(
        &self,
        organisation_id: OrganisationId,
        branch_id: BranchId,
    ) -> EntityListController<ClassFeeMapping> {
        self.list_controller(branch_scope(organisation_id, branch_id))
    }

    pub fn student_enrollment_list(
        &self,
        organisation_id: OrganisationId,
        branch_id: BranchId,
    ) -> EntityListController<StudentEnrollment> {
        self.list_controller(branch_scope(organisation_id, branch_id))
    }
}

fn branch_scope(organisation_id: OrganisationId, branch_id: BranchId) -> ScopeContext {
    ScopeContext::new()
        .with_organisation(organisation_id)
        .with_branch(branch_id)
}
