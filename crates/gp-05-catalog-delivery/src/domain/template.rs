//! Delivery option template.
//!
//! The template is the product's full delivery-option document. Only three
//! fields are rewritten; everything else is submitted as-is.

use std::path::Path;

use serde_json::Value;

use crate::domain::errors::DeliveryError;

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryTemplate {
    document: Value,
}

impl DeliveryTemplate {
    pub fn from_value(document: Value) -> Self {
        Self { document }
    }

    pub fn load(path: &Path) -> Result<Self, DeliveryError> {
        let text = std::fs::read_to_string(path).map_err(|source| DeliveryError::TemplateIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_value(serde_json::from_str(&text)?))
    }

    /// Copy of the template with artifact, credential and version title set.
    pub fn patched(
        &self,
        artifact_id: &str,
        credential_ref: &str,
        version_label: &str,
    ) -> Result<Value, DeliveryError> {
        let mut doc = self.document.clone();

        let source = doc
            .pointer_mut("/DeliveryOptions/0/Details/AmiDeliveryOptionDetails/AmiSource")
            .and_then(Value::as_object_mut)
            .ok_or(DeliveryError::TemplateShape(
                "DeliveryOptions[0].Details.AmiDeliveryOptionDetails.AmiSource",
            ))?;
        source.insert("AmiId".into(), Value::from(artifact_id));
        source.insert("AccessRoleArn".into(), Value::from(credential_ref));

        let version = doc
            .pointer_mut("/Version")
            .and_then(Value::as_object_mut)
            .ok_or(DeliveryError::TemplateShape("Version"))?;
        version.insert("VersionTitle".into(), Value::from(version_label));

        Ok(doc)
    }
}
