use serde_json::json;
use shared_types::{BranchId, OrganisationId};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::CampusCore;
use crate::config::core_config::{BackendConfig, CoreConfig};
use crate::model::organisation::CreateOrganisationRequest;
use crate::service::error::ServiceError;

fn config(base_url: &str) -> CoreConfig {
    CoreConfig {
        backend: Some(BackendConfig {
            base_url: base_url.parse().unwrap(),
            request_timeout: None,
        }),
        ..Default::default()
    }
}

#[test]
fn test_missing_backend_config() {
    let result = CampusCore::new(CoreConfig::default(), None);

    assert!(matches!(result, Err(ServiceError::MissingBackendConfig)));
}

#[test]
fn test_backend_url_must_be_a_base() {
    let result = CampusCore::new(config("mailto:admin@campus.example"), None);

    assert!(matches!(result, Err(ServiceError::InvalidBackendUrl(_))));
}

#[tokio::test]
async fn test_scoped_list_over_rest_backend() {
    let mock_server = MockServer::start().await;
    let organisation_id = OrganisationId::new_v4();
    let branch_id = BranchId::new_v4();

    Mock::given(method("GET"))
        .and(path("/fee-groups"))
        .and(query_param("organisationId", organisation_id.to_string()))
        .and(query_param("branchId", branch_id.to_string()))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": uuid::Uuid::new_v4(),
                "organisationId": organisation_id,
                "branchId": branch_id,
                "name": "Tuition",
                "description": null,
                "isActive": true,
            }],
            "count": 1,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let core = CampusCore::new(config(&mock_server.uri()), None).unwrap();
    let controller = core.fee_group_list(organisation_id, branch_id);
    controller.load();
    let view = controller.wait_idle().await;

    assert_eq!(view.error, None);
    assert_eq!(view.total_count, 1);
    assert_eq!(view.items[0].name, "Tuition");
    assert_eq!(view.metrics.start_item, 1);
    assert_eq!(view.metrics.end_item, 1);
}

#[tokio::test]
async fn test_controllers_share_cache_and_mutation_refetches() {
    let mock_server = MockServer::start().await;
    let organisation = json!({
        "id": OrganisationId::new_v4(),
        "name": "Riverside Academy",
        "code": "RSA",
        "email": null,
        "phone": null,
        "isActive": true,
        "createdDate": "2024-03-01T08:00:00Z",
    });

    Mock::given(method("GET"))
        .and(path("/organisations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": [organisation], "count": 1 })),
        )
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/organisations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&organisation))
        .expect(1)
        .mount(&mock_server)
        .await;

    let core = CampusCore::new(config(&mock_server.uri()), Some("token".to_string())).unwrap();

    let first = core.organisation_list();
    first.load();
    first.wait_idle().await;

    let second = core.organisation_list();
    second.load();
    assert_eq!(second.wait_idle().await.total_count, 1);

    second
        .create_entity(CreateOrganisationRequest {
            name: "Riverside Academy".to_string(),
            code: "RSA".to_string(),
            email: None,
            phone: None,
        })
        .await
        .unwrap();
    let view = second.wait_idle().await;
    assert_eq!(view.error, None);
}
