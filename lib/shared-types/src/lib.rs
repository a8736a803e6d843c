//! Identifier newtypes shared between the list core and its hosts.

mod academic_id;
mod fee_id;
mod macros;
mod organisation_id;
mod student_id;

pub use academic_id::*;
pub use fee_id::*;
pub use organisation_id::*;
pub use student_id::*;

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_uuid_newtype_parse_and_display() {
        let uuid = Uuid::new_v4();
        let id = OrganisationId::from_str(&uuid.to_string()).unwrap();

        assert_eq!(id, uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_uuid_newtype_rejects_garbage() {
        assert!(BranchId::from_str("not-an-id").is_err());
    }

    #[test]
    fn test_uuid_newtype_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let id: FeeHeadId = uuid.into();

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));

        let back: FeeHeadId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
