use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::{BranchId, OrganisationId};

use super::common::SortDirection;

pub const ORGANISATION_ID: &str = "organisationId";
pub const BRANCH_ID: &str = "branchId";

/// Caller-owned filter dimensions partitioning a collection (organisation, branch, ...).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeContext(BTreeMap<String, String>);

impl ScopeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_organisation(self, organisation_id: OrganisationId) -> Self {
        self.with(ORGANISATION_ID, organisation_id)
    }

    pub fn with_branch(self, branch_id: BranchId) -> Self {
        self.with(BRANCH_ID, branch_id)
    }

    /// Returns `true` if the stored value changed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> bool {
        let value = value.to_string();
        let previous = self.0.insert(key.into(), value.clone());
        previous.as_ref() != Some(&value)
    }

    /// Returns `true` if a value was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.0.remove(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for ScopeContext {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.to_string()))
                .collect(),
        )
    }
}

/// Query state owned by a list controller.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListQuery {
    pub page_index: u32,
    pub page_size: u32,
    pub search: String,
    pub sort_by: Option<String>,
    pub sort_order: SortDirection,
    pub scope: ScopeContext,
}

impl ListQuery {
    pub fn new(page_size: u32, scope: ScopeContext) -> Self {
        Self {
            page_index: 0,
            page_size,
            search: String::new(),
            sort_by: None,
            sort_order: SortDirection::default(),
            scope,
        }
    }

    pub fn to_request(&self) -> PageRequest {
        PageRequest {
            page_index: self.page_index,
            page_size: self.page_size,
            search: self.search.clone(),
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_by.as_ref().map(|_| self.sort_order),
            scope: self.scope.clone(),
        }
    }
}

/// Identifies one fetchable view of a collection: the entity family plus the full query tuple.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct QueryKey {
    pub family: &'static str,
    pub query: ListQuery,
}

impl QueryKey {
    pub fn new(family: &'static str, query: ListQuery) -> Self {
        Self { family, query }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageRequest {
    pub page_index: u32,
    pub page_size: u32,
    pub search: String,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortDirection>,
    pub scope: ScopeContext,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<E> {
    pub data: Vec<E>,
    pub count: u64,
}
