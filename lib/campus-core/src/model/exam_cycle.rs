use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{AcademicYearId, BranchId, ExamCycleId, OrganisationId};
use strum::{AsRefStr, Display, EnumString};
use time::OffsetDateTime;

use super::common::FieldValue;
use super::entity::ListEntity;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamCycle {
    pub id: ExamCycleId,
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub academic_year_id: AcademicYearId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableExamCycleColumn {
    Name,
    StartsAt,
    EndsAt,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamCycleRequest {
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub academic_year_id: AcademicYearId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExamCycleRequest {
    pub name: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub starts_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ends_at: Option<OffsetDateTime>,
}

impl ListEntity for ExamCycle {
    type Id = ExamCycleId;
    type CreateRequest = CreateExamCycleRequest;
    type UpdateRequest = UpdateExamCycleRequest;

    const RESOURCE: &'static str = "exam-cycles";

    fn id(&self) -> &ExamCycleId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableExamCycleColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableExamCycleColumn::Name => self.name.as_str().into(),
            SortableExamCycleColumn::StartsAt => self.starts_at.into(),
            SortableExamCycleColumn::EndsAt => self.ends_at.into(),
        }
    }
}
