use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::common::FieldValue;

/// A record that can be listed, paginated and mutated through the list controller.
///
/// `RESOURCE` names the query-key family and the REST collection path segment.
/// `field` exposes sortable columns by their wire name; unknown columns yield [`FieldValue::Null`].
pub trait ListEntity: Clone + Debug + DeserializeOwned + Send + Sync + 'static {
    type Id: Clone + Debug + Display + Eq + Hash + Serialize + Send + Sync + 'static;
    type CreateRequest: Debug + Serialize + Send + Sync + 'static;
    type UpdateRequest: Debug + Serialize + Send + Sync + 'static;

    const RESOURCE: &'static str;

    fn id(&self) -> &Self::Id;

    fn field(&self, key: &str) -> FieldValue;
}
