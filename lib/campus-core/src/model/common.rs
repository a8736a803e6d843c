use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use time::OffsetDateTime;

#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    #[strum(serialize = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    #[strum(serialize = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Value of a single sortable column, as seen by the client-side sort overlay.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        Self::Number(value.into())
    }
}

// timestamps sort chronologically
impl From<OffsetDateTime> for FieldValue {
    fn from(value: OffsetDateTime) -> Self {
        Self::Number(value.unix_timestamp() as f64)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
