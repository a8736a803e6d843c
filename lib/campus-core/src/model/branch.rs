use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{BranchId, OrganisationId};
use strum::{AsRefStr, Display, EnumString};
use time::OffsetDateTime;

use super::common::FieldValue;
use super::entity::ListEntity;

/// Campus of an organisation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: BranchId,
    pub organisation_id: OrganisationId,
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableBranchColumn {
    Name,
    Code,
    City,
    IsActive,
    CreatedDate,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest {
    pub organisation_id: OrganisationId,
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Absent fields are left unchanged; `Some(None)` clears a nullable field.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub address: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl ListEntity for Branch {
    type Id = BranchId;
    type CreateRequest = CreateBranchRequest;
    type UpdateRequest = UpdateBranchRequest;

    const RESOURCE: &'static str = "branches";

    fn id(&self) -> &BranchId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableBranchColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableBranchColumn::Name => self.name.as_str().into(),
            SortableBranchColumn::Code => self.code.as_str().into(),
            SortableBranchColumn::City => self.city.as_deref().into(),
            SortableBranchColumn::IsActive => self.is_active.into(),
            SortableBranchColumn::CreatedDate => self.created_date.into(),
        }
    }
}
