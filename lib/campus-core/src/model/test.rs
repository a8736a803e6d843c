use serde_json::json;
use shared_types::{BranchId, OrganisationId};
use time::macros::datetime;

use super::branch::Branch;
use super::common::{FieldValue, SortDirection};
use super::designation::{Designation, UpdateDesignationRequest};
use super::entity::ListEntity;
use super::list_query::{ListQuery, ScopeContext};
use super::organisation::{Organisation, SortableOrganisationColumn};

fn dummy_organisation() -> Organisation {
    Organisation {
        id: OrganisationId::new_v4(),
        name: "Riverside Academy".to_string(),
        code: "RSA".to_string(),
        email: None,
        phone: Some("+41 44 000 00 00".to_string()),
        is_active: true,
        created_date: datetime!(2024-03-01 08:00 UTC),
    }
}

#[test]
fn test_organisation_field_by_column_name() {
    let organisation = dummy_organisation();

    assert_eq!(
        organisation.field(SortableOrganisationColumn::Name.as_ref()),
        FieldValue::Text("Riverside Academy".to_string())
    );
    assert_eq!(organisation.field("email"), FieldValue::Null);
    assert_eq!(organisation.field("isActive"), FieldValue::Bool(true));
    assert_eq!(
        organisation.field("createdDate"),
        FieldValue::Number(datetime!(2024-03-01 08:00 UTC).unix_timestamp() as f64)
    );
}

#[test]
fn test_unknown_column_is_null() {
    assert_eq!(dummy_organisation().field("doesNotExist"), FieldValue::Null);
    assert_eq!(dummy_organisation().field("phone"), FieldValue::Null);
}

#[test]
fn test_branch_deserializes_backend_payload() {
    let organisation_id = OrganisationId::new_v4();
    let branch_id = BranchId::new_v4();

    let branch: Branch = serde_json::from_value(json!({
        "id": branch_id,
        "organisationId": organisation_id,
        "name": "North Campus",
        "code": "N1",
        "address": null,
        "city": "Zurich",
        "isActive": false,
        "createdDate": "2023-09-01T10:00:00Z",
    }))
    .unwrap();

    assert_eq!(branch.id, branch_id);
    assert_eq!(branch.organisation_id, organisation_id);
    assert_eq!(branch.city.as_deref(), Some("Zurich"));
    assert_eq!(branch.created_date, datetime!(2023-09-01 10:00 UTC));
    assert_eq!(Branch::RESOURCE, "branches");
}

#[test]
fn test_update_request_skips_unset_fields() {
    let request = UpdateDesignationRequest {
        level: Some(Some(2)),
        ..Default::default()
    };

    assert_eq!(serde_json::to_value(request).unwrap(), json!({ "level": 2 }));
}

#[test]
fn test_update_request_clears_nullable_field() {
    let request = UpdateDesignationRequest {
        name: Some("Vice Principal".to_string()),
        description: Some(None),
        ..Default::default()
    };

    assert_eq!(
        serde_json::to_value(request).unwrap(),
        json!({ "name": "Vice Principal", "description": null })
    );
}

#[test]
fn test_designation_level_sorts_as_number() {
    let designation = Designation {
        id: shared_types::DesignationId::new_v4(),
        organisation_id: OrganisationId::new_v4(),
        name: "Principal".to_string(),
        level: Some(1),
        description: None,
    };

    assert_eq!(designation.field("level"), FieldValue::Number(1.0));
}

#[test]
fn test_scope_context_insert_reports_change() {
    let organisation_id = OrganisationId::new_v4();
    let mut scope = ScopeContext::new().with_organisation(organisation_id);

    assert!(!scope.insert("organisationId", organisation_id));
    assert!(scope.insert("branchId", "b-1"));
    assert!(scope.remove("branchId"));
    assert!(!scope.remove("branchId"));
    assert_eq!(
        scope.get("organisationId"),
        Some(organisation_id.to_string().as_str())
    );
}

#[test]
fn test_request_omits_sort_order_without_sort_column() {
    let mut query = ListQuery::new(10, ScopeContext::new());
    query.sort_order = SortDirection::Descending;

    let request = query.to_request();
    assert_eq!(request.sort_by, None);
    assert_eq!(request.sort_order, None);

    query.sort_by = Some("name".to_string());
    let request = query.to_request();
    assert_eq!(request.sort_order, Some(SortDirection::Descending));
}

#[test]
fn test_sort_direction_wire_names() {
    assert_eq!(SortDirection::Ascending.to_string(), "asc");
    assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Descending);
    assert_eq!(
        serde_json::to_value(SortDirection::Descending).unwrap(),
        json!("desc")
    );
    assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
}

#[test]
fn test_scope_context_from_map() {
    let organisation_id = OrganisationId::new_v4();
    let scope: ScopeContext = maplit::btreemap! {
        "branchId" => "b-1".to_string(),
        "organisationId" => organisation_id.to_string(),
    }
    .into_iter()
    .collect();

    assert_eq!(scope, ScopeContext::new().with_organisation(organisation_id).with("branchId", "b-1"));
    assert_eq!(
        scope.iter().map(|(key, _)| key).collect::<Vec<_>>(),
        vec!["branchId", "organisationId"]
    );
}
