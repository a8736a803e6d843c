use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{AcademicYearId, BranchId, ClassFeeMappingId, ClassId, FeeHeadId, OrganisationId};
use strum::{AsRefStr, Display, EnumString};

use super::common::FieldValue;
use super::entity::ListEntity;

/// Assigns a fee head to a class for one academic year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassFeeMapping {
    pub id: ClassFeeMappingId,
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub class_id: ClassId,
    pub class_name: String,
    pub fee_head_id: FeeHeadId,
    pub fee_head_name: String,
    pub academic_year_id: AcademicYearId,
    pub amount: i64,
    pub due_day: Option<u8>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableClassFeeMappingColumn {
    ClassName,
    FeeHeadName,
    Amount,
    DueDay,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassFeeMappingRequest {
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub class_id: ClassId,
    pub fee_head_id: FeeHeadId,
    pub academic_year_id: AcademicYearId,
    pub amount: i64,
    pub due_day: Option<u8>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassFeeMappingRequest {
    pub amount: Option<i64>,
    pub due_day: Option<Option<u8>>,
}

impl ListEntity for ClassFeeMapping {
    type Id = ClassFeeMappingId;
    type CreateRequest = CreateClassFeeMappingRequest;
    type UpdateRequest = UpdateClassFeeMappingRequest;

    const RESOURCE: &'static str = "class-fee-mappings";

    fn id(&self) -> &ClassFeeMappingId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableClassFeeMappingColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableClassFeeMappingColumn::ClassName => self.class_name.as_str().into(),
            SortableClassFeeMappingColumn::FeeHeadName => self.fee_head_name.as_str().into(),
            SortableClassFeeMappingColumn::Amount => self.amount.into(),
            SortableClassFeeMappingColumn::DueDay => self.due_day.into(),
        }
    }
}
