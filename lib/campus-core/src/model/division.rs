use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{BranchId, DivisionId, OrganisationId};
use strum::{AsRefStr, Display, EnumString};

use super::common::FieldValue;
use super::entity::ListEntity;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub id: DivisionId,
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableDivisionColumn {
    Name,
    Code,
    Description,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDivisionRequest {
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDivisionRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<Option<String>>,
}

impl ListEntity for Division {
    type Id = DivisionId;
    type CreateRequest = CreateDivisionRequest;
    type UpdateRequest = UpdateDivisionRequest;

    const RESOURCE: &'static str = "divisions";

    fn id(&self) -> &DivisionId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableDivisionColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableDivisionColumn::Name => self.name.as_str().into(),
            SortableDivisionColumn::Code => self.code.as_str().into(),
            SortableDivisionColumn::Description => self.description.as_deref().into(),
        }
    }
}
