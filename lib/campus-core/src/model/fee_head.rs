use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use shared_types::{BranchId, FeeGroupId, FeeHeadId, OrganisationId};
use strum::{AsRefStr, Display, EnumString};

use super::common::FieldValue;
use super::entity::ListEntity;

/// Single chargeable fee item. Amounts are in the smallest currency unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeHead {
    pub id: FeeHeadId,
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub fee_group_id: FeeGroupId,
    pub name: String,
    pub amount: i64,
    pub is_refundable: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortableFeeHeadColumn {
    Name,
    Amount,
    IsRefundable,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeeHeadRequest {
    pub organisation_id: OrganisationId,
    pub branch_id: BranchId,
    pub fee_group_id: FeeGroupId,
    pub name: String,
    pub amount: i64,
    pub is_refundable: bool,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeeHeadRequest {
    pub fee_group_id: Option<FeeGroupId>,
    pub name: Option<String>,
    pub amount: Option<i64>,
    pub is_refundable: Option<bool>,
}

impl ListEntity for FeeHead {
    type Id = FeeHeadId;
    type CreateRequest = CreateFeeHeadRequest;
    type UpdateRequest = UpdateFeeHeadRequest;

    const RESOURCE: &'static str = "fee-heads";

    fn id(&self) -> &FeeHeadId {
        &self.id
    }

    fn field(&self, key: &str) -> FieldValue {
        let Ok(column) = key.parse::<SortableFeeHeadColumn>() else {
            return FieldValue::Null;
        };

        match column {
            SortableFeeHeadColumn::Name => self.name.as_str().into(),
            SortableFeeHeadColumn::Amount => self.amount.into(),
            SortableFeeHeadColumn::IsRefundable => self.is_refundable.into(),
        }
    }
}
