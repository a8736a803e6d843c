use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{BranchId, OrganisationId, StreamId};
use strum::{AsRefStr, Display, EnumString};

use super::common::FieldValue;
use super::entity::ListEntity;

/// Course stream offered by a branch (science, commerce, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub id: StreamId,
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub name: String,
    pub code: String,
    pub is_active: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableStreamColumn {
    Name,
    Code,
    IsActive,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStreamRequest {
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub name: String,
    pub code: String,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStreamRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub is_active: Option<bool>,
}

impl ListEntity for Stream {
    type Id = StreamId;
    type CreateRequest = CreateStreamRequest;
    type UpdateRequest = UpdateStreamRequest;

    const RESOURCE: &'static str = "streams";

    fn id(&self) -> &StreamId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableStreamColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableStreamColumn::Name => self.name.as_str().into(),
            SortableStreamColumn::Code => self.code.as_str().into(),
            SortableStreamColumn::IsActive => self.is_active.into(),
        }
    }
}
