//! # Delivery Errors

use std::path::PathBuf;

use shared_types::{Classify, ErrorKind};
use thiserror::Error;

/// Errors reported by a catalog client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The product is locked by the catalog.
    #[error("resource in use: {0}")]
    ResourceInUse(String),

    #[error("catalog request failed: {0}")]
    Service(String),
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to read delivery template {}: {source}", path.display())]
    TemplateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("delivery template is not valid JSON: {0}")]
    TemplateJson(#[from] serde_json::Error),

    /// A field the patch must update is absent.
    #[error("delivery template has no {0}")]
    TemplateShape(&'static str),

    #[error(transparent)]
    Catalog(CatalogError),
}

impl Classify for DeliveryError {
    fn kind(&self) -> ErrorKind {
        match self {
            DeliveryError::TemplateIo { .. } => ErrorKind::MissingInput,
            DeliveryError::TemplateJson(_) | DeliveryError::TemplateShape(_) => {
                ErrorKind::InvariantViolation
            }
            DeliveryError::Catalog(CatalogError::ResourceInUse(_)) => {
                ErrorKind::ExternalServiceBlocked
            }
            DeliveryError::Catalog(CatalogError::Service(_)) => ErrorKind::Io,
        }
    }
}
