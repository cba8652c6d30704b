//! # Delivery Service

use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::change_set::{Change, ChangeSetRequest, EntityRef};
use crate::domain::errors::{CatalogError, DeliveryError};
use crate::domain::outcome::DeliveryOutcome;
use crate::domain::release::release_label;
use crate::domain::template::DeliveryTemplate;
use crate::ports::CatalogClient;

/// Catalog coordinates of the product.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub catalog: String,
    pub entity_type: String,
    pub product_id: String,
    pub change_type: String,
    pub change_name: String,
    /// Prepended to the version label to form the change set name.
    pub change_set_prefix: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            catalog: "AWSMarketplace".to_string(),
            entity_type: "AmiProduct@1.0".to_string(),
            product_id: String::new(),
            change_type: "AddDeliveryOptions".to_string(),
            change_name: "Update".to_string(),
            change_set_prefix: "Lux Update".to_string(),
        }
    }
}

pub struct DeliveryService<C: CatalogClient> {
    client: C,
    template: DeliveryTemplate,
    config: DeliveryConfig,
}

impl<C: CatalogClient> DeliveryService<C> {
    pub fn new(client: C, template: DeliveryTemplate, config: DeliveryConfig) -> Self {
        Self {
            client,
            template,
            config,
        }
    }

    /// Prepare the change set without submitting it.
    pub fn prepare(
        &self,
        artifact_id: &str,
        credential_ref: &str,
        version_label: &str,
    ) -> Result<ChangeSetRequest, DeliveryError> {
        let details = self
            .template
            .patched(artifact_id, credential_ref, version_label)?;

        Ok(ChangeSetRequest {
            catalog: self.config.catalog.clone(),
            change_set: vec![Change {
                change_type: self.config.change_type.clone(),
                entity: EntityRef {
                    entity_type: self.config.entity_type.clone(),
                    identifier: self.config.product_id.clone(),
                },
                details: serde_json::to_string(&details)?,
                change_name: self.config.change_name.clone(),
            }],
            change_set_name: format!("{} {}", self.config.change_set_prefix, version_label),
            client_request_token: Uuid::new_v4(),
        })
    }

    /// Submit the artifact as a new delivery option.
    ///
    /// A locked product yields `DeliveryOutcome::Blocked`, not an error.
    pub async fn submit_delivery(
        &self,
        artifact_id: &str,
        credential_ref: &str,
        version_label: &str,
    ) -> Result<DeliveryOutcome, DeliveryError> {
        let request = self.prepare(artifact_id, credential_ref, version_label)?;

        match self.client.start_change_set(&request).await {
            Ok(receipt) => {
                info!(
                    "[gp-05] change set {} submitted ({})",
                    request.change_set_name, receipt.change_set_id
                );
                Ok(DeliveryOutcome::Submitted(receipt))
            }
            Err(CatalogError::ResourceInUse(message)) => {
                warn!("[gp-05] product is currently blocked by the catalog: {}", message);
                Ok(DeliveryOutcome::Blocked { message })
            }
            Err(e) => Err(DeliveryError::Catalog(e)),
        }
    }

    /// Submit for a release tag, skipping release candidates.
    pub async fn submit_release(
        &self,
        artifact_id: &str,
        credential_ref: &str,
        tag: &str,
    ) -> Result<DeliveryOutcome, DeliveryError> {
        match release_label(tag) {
            Some(label) => self.submit_delivery(artifact_id, credential_ref, &label).await,
            None => {
                info!("[gp-05] {} is a release candidate, nothing to do", tag);
                Ok(DeliveryOutcome::SkippedPrerelease {
                    tag: tag.to_string(),
                })
            }
        }
    }
}
