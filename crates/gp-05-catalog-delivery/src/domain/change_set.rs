//! Change set request and receipt.
//!
//! Field names follow the catalog API's PascalCase convention.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityRef {
    #[serde(rename = "Type")]
    pub entity_type: String,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Change {
    pub change_type: String,
    pub entity: EntityRef,
    /// Patched template, serialized as JSON text.
    pub details: String,
    pub change_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeSetRequest {
    pub catalog: String,
    pub change_set: Vec<Change>,
    pub change_set_name: String,
    /// Idempotency token, fresh per submission.
    pub client_request_token: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeSetReceipt {
    pub change_set_id: String,
    pub change_set_arn: String,
}
