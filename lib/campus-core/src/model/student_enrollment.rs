use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{AcademicYearId, BranchId, ClassId, OrganisationId, StudentEnrollmentId, StudentId};
use strum::{AsRefStr, Display, EnumString};
use time::OffsetDateTime;

use super::common::FieldValue;
use super::entity::ListEntity;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentEnrollment {
    pub id: StudentEnrollmentId,
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub student_id: StudentId,
    pub student_name: String,
    pub class_id: ClassId,
    pub academic_year_id: AcademicYearId,
    pub roll_number: Option<u32>,
    #[serde(with = "time::serde::rfc3339")]
    pub enrolled_at: OffsetDateTime,
    pub is_active: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableStudentEnrollmentColumn {
    StudentName,
    RollNumber,
    EnrolledAt,
    IsActive,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentEnrollmentRequest {
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub student_id: StudentId,
    pub class_id: ClassId,
    pub academic_year_id: AcademicYearId,
    pub roll_number: Option<u32>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentEnrollmentRequest {
    pub class_id: Option<ClassId>,
    pub roll_number: Option<Option<u32>>,
    pub is_active: Option<bool>,
}

impl ListEntity for StudentEnrollment {
    type Id = StudentEnrollmentId;
    type CreateRequest = CreateStudentEnrollmentRequest;
    type UpdateRequest = UpdateStudentEnrollmentRequest;

    const RESOURCE: &'static str = "student-enrollments";

    fn id(&self) -> &StudentEnrollmentId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableStudentEnrollmentColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableStudentEnrollmentColumn::StudentName => self.student_name.as_str().into(),
            SortableStudentEnrollmentColumn::RollNumber => self.roll_number.into(),
            SortableStudentEnrollmentColumn::EnrolledAt => self.enrolled_at.into(),
            SortableStudentEnrollmentColumn::IsActive => self.is_active.into(),
        }
    }
}
