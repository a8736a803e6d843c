use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{AcademicYearId, OrganisationId};
use strum::{AsRefStr, Display, EnumString};
use time::OffsetDateTime;

use super::common::FieldValue;
use super::entity::ListEntity;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYear {
    pub id: AcademicYearId,
    pub organisation_id: OrganisationId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
    pub is_current: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableAcademicYearColumn {
    Name,
    StartsAt,
    EndsAt,
    IsCurrent,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAcademicYearRequest {
    pub organisation_id: OrganisationId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAcademicYearRequest {
    pub name: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub starts_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ends_at: Option<OffsetDateTime>,
    pub is_current: Option<bool>,
}

impl ListEntity for AcademicYear {
    type Id = AcademicYearId;
    type CreateRequest = CreateAcademicYearRequest;
    type UpdateRequest = UpdateAcademicYearRequest;

    const RESOURCE: &'static str = "academic-years";

    fn id(&self) -> &AcademicYearId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableAcademicYearColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableAcademicYearColumn::Name => self.name.as_str().into(),
            SortableAcademicYearColumn::StartsAt => self.starts_at.into(),
            SortableAcademicYearColumn::EndsAt => self.ends_at.into(),
            SortableAcademicYearColumn::IsCurrent => self.is_current.into(),
        }
    }
}
