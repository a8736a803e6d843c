use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{BranchId, FeeGroupId, OrganisationId};
use strum::{AsRefStr, Display, EnumString};

use super::common::FieldValue;
use super::entity::ListEntity;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeGroup {
    pub id: FeeGroupId,
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableFeeGroupColumn {
    Name,
    IsActive,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeeGroupRequest {
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub name: String,
    pub description: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeeGroupRequest {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl ListEntity for FeeGroup {
    type Id = FeeGroupId;
    type CreateRequest = CreateFeeGroupRequest;
    type UpdateRequest = UpdateFeeGroupRequest;

    const RESOURCE: &'static str = "fee-groups";

    fn id(&self) -> &FeeGroupId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableFeeGroupColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableFeeGroupColumn::Name => self.name.as_str().into(),
            SortableFeeGroupColumn::IsActive => self.is_active.into(),
        }
    }
}
