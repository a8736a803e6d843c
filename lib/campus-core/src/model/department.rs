use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{BranchId, DepartmentId, OrganisationId};
use strum::{AsRefStr, Display, EnumString};

use super::common::FieldValue;
use super::entity::ListEntity;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub name: String,
    pub code: String,
    pub head_of_department: Option<String>,
    pub is_active: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableDepartmentColumn {
    Name,
    Code,
    HeadOfDepartment,
    IsActive,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub name: String,
    pub code: String,
    pub head_of_department: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub head_of_department: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl ListEntity for Department {
    type Id = DepartmentId;
    type CreateRequest = CreateDepartmentRequest;
    type UpdateRequest = UpdateDepartmentRequest;

    const RESOURCE: &'static str = "departments";

    fn id(&self) -> &DepartmentId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableDepartmentColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableDepartmentColumn::Name => self.name.as_str().into(),
            SortableDepartmentColumn::Code => self.code.as_str().into(),
            SortableDepartmentColumn::HeadOfDepartment => self.head_of_department.as_deref().into(),
            SortableDepartmentColumn::IsActive => self.is_active.into(),
        }
    }
}
