use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::macros::impls_for_uuid_newtype;

/// Top level tenant; every other record is scoped to one.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct OrganisationId(Uuid);

impls_for_uuid_newtype!(OrganisationId);

/// Campus or site of an organisation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct BranchId(Uuid);

impls_for_uuid_newtype!(BranchId);
