use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::OrganisationId;
use strum::{AsRefStr, Display, EnumString};
use time::OffsetDateTime;

use super::common::FieldValue;
use super::entity::ListEntity;

/// Tenant owning every other record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    pub id: OrganisationId,
    pub name: String,
    pub code: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableOrganisationColumn {
    Name,
    Code,
    Email,
    IsActive,
    CreatedDate,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganisationRequest {
    pub name: String,
    pub code: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Absent fields are left unchanged; `Some(None)` clears a nullable field.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganisationRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl ListEntity for Organisation {
    type Id = OrganisationId;
    type CreateRequest = CreateOrganisationRequest;
    type UpdateRequest = UpdateOrganisationRequest;

    const RESOURCE: &'static str = "organisations";

    fn id(&self) -> &OrganisationId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableOrganisationColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableOrganisationColumn::Name => self.name.as_str().into(),
            SortableOrganisationColumn::Code => self.code.as_str().into(),
            SortableOrganisationColumn::Email => self.email.as_deref().into(),
            SortableOrganisationColumn::IsActive => self.is_active.into(),
            SortableOrganisationColumn::CreatedDate => self.created_date.into(),
        }
    }
}
