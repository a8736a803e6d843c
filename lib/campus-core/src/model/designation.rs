use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{DesignationId, OrganisationId};
use strum::{AsRefStr, Display, EnumString};

use super::common::FieldValue;
use super::entity::ListEntity;

/// Staff role; `level` orders the hierarchy, lower is more senior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Designation {
    pub id: DesignationId,
    pub organisation_id: OrganisationId,
    pub name: String,
    pub level: Option<u32>,
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableDesignationColumn {
    Name,
    Level,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDesignationRequest {
    pub organisation_id: OrganisationId,
    pub name: String,
    pub level: Option<u32>,
    pub description: Option<String>,
}

/// Absent fields are left unchanged; `Some(None)` clears a nullable field.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDesignationRequest {
    pub name: Option<String>,
    pub level: Option<Option<u32>>,
    pub description: Option<Option<String>>,
}

impl ListEntity for Designation {
    type Id = DesignationId;
    type CreateRequest = CreateDesignationRequest;
    type UpdateRequest = UpdateDesignationRequest;

    const RESOURCE: &'static str = "designations";

    fn id(&self) -> &DesignationId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableDesignationColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableDesignationColumn::Name => self.name.as_str().into(),
            SortableDesignationColumn::Level => self.level.into(),
        }
    }
}
