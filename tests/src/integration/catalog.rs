//! Delivery submission against a scripted catalog.

use std::sync::Mutex;

use async_trait::async_trait;
use gp_05_catalog_delivery::{
    CatalogClient, CatalogError, ChangeSetReceipt, ChangeSetRequest, DeliveryConfig,
    DeliveryOutcome, DeliveryService, DeliveryTemplate,
};
use serde_json::json;
use shared_types::ErrorKind;

/// Answers each call with the next scripted response.
struct ScriptedCatalog {
    responses: Mutex<Vec<Result<ChangeSetReceipt, CatalogError>>>,
    calls: Mutex<usize>,
}

impl ScriptedCatalog {
    fn new(mut responses: Vec<Result<ChangeSetReceipt, CatalogError>>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CatalogClient for ScriptedCatalog {
    async fn start_change_set(
        &self,
        _request: &ChangeSetRequest,
    ) -> Result<ChangeSetReceipt, CatalogError> {
        *self.calls.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(CatalogError::Service("no scripted response".into())))
    }
}

fn template_file(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("delivery-options.json");
    let template = json!({
        "Version": {"VersionTitle": "0.0.0", "ReleaseNotes": "See changelog"},
        "DeliveryOptions": [{
            "Details": {"AmiDeliveryOptionDetails": {
                "AmiSource": {"AmiId": "ami-old", "AccessRoleArn": "role-old", "UserName": "ubuntu"}
            }}
        }]
    });
    std::fs::write(&path, serde_json::to_string_pretty(&template).unwrap()).unwrap();
    path
}

fn receipt() -> ChangeSetReceipt {
    ChangeSetReceipt {
        change_set_id: "cs-42".into(),
        change_set_arn: "arn:catalog:cs-42".into(),
    }
}

#[tokio::test]
async fn test_blocked_then_submitted() {
    let dir = tempfile::tempdir().unwrap();
    let template = DeliveryTemplate::load(&template_file(dir.path())).unwrap();
    let catalog = ScriptedCatalog::new(vec![
        Err(CatalogError::ResourceInUse("entity is locked by change set cs-41".into())),
        Ok(receipt()),
    ]);
    let service = DeliveryService::new(
        catalog,
        template,
        DeliveryConfig {
            product_id: "prod-lux".into(),
            ..Default::default()
        },
    );

    let first = service
        .submit_release("ami-123", "arn:role/ingest", "v1.4.0")
        .await
        .unwrap();
    assert!(first.is_blocked());
    assert_eq!(first.error_kind(), Some(ErrorKind::ExternalServiceBlocked));
    match &first {
        DeliveryOutcome::Blocked { message } => assert!(message.contains("cs-41")),
        other => panic!("unexpected outcome {:?}", other),
    }

    // Retrying is the caller's decision.
    let second = service
        .submit_release("ami-123", "arn:role/ingest", "v1.4.0")
        .await
        .unwrap();
    assert_eq!(second, DeliveryOutcome::Submitted(receipt()));
}

#[tokio::test]
async fn test_release_candidate_never_reaches_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let template = DeliveryTemplate::load(&template_file(dir.path())).unwrap();
    let service = DeliveryService::new(
        ScriptedCatalog::new(vec![Ok(receipt())]),
        template,
        DeliveryConfig::default(),
    );

    let outcome = service
        .submit_release("ami-123", "arn:role/ingest", "v1.5.0-rc1")
        .await
        .unwrap();
    assert!(matches!(outcome, DeliveryOutcome::SkippedPrerelease { .. }));
}

#[test]
fn test_prepared_change_set_carries_patched_template() {
    let dir = tempfile::tempdir().unwrap();
    let template = DeliveryTemplate::load(&template_file(dir.path())).unwrap();
    let service = DeliveryService::new(
        ScriptedCatalog::new(Vec::new()),
        template,
        DeliveryConfig::default(),
    );

    let request = service.prepare("ami-9", "arn:role/x", "2.0.1").unwrap();
    let details: serde_json::Value = serde_json::from_str(&request.change_set[0].details).unwrap();
    let source = &details["DeliveryOptions"][0]["Details"]["AmiDeliveryOptionDetails"]["AmiSource"];
    assert_eq!(source["AmiId"], "ami-9");
    assert_eq!(source["AccessRoleArn"], "arn:role/x");
    assert_eq!(source["UserName"], "ubuntu");
    assert_eq!(details["Version"]["VersionTitle"], "2.0.1");
    assert_eq!(details["Version"]["ReleaseNotes"], "See changelog");
}
