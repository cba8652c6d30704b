//! # Catalog Delivery (gp-05)
//!
//! Publishes a newly built machine image as a delivery option of an existing
//! catalog product. Building the image is out of scope; this crate only
//! prepares and submits the change set.
//!
//! ## Flow
//!
//! ```text
//! release tag ──→ version label (leading 'v' stripped, rc tags skipped)
//!                     │
//! template JSON ──→ patch artifact id, access credential, version title
//!                     │
//!                     └──→ AddDeliveryOptions change set (fresh request token)
//!                               │
//!                     CatalogClient::start_change_set
//!                       ├─ Ok(receipt)       → Submitted(receipt)
//!                       └─ Err(ResourceInUse) → Blocked { message }   (never retried)
//! ```
//!
//! No concrete cloud client ships with this crate; callers inject one that
//! implements [`CatalogClient`].

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::change_set::{Change, ChangeSetReceipt, ChangeSetRequest, EntityRef};
pub use domain::errors::{CatalogError, DeliveryError};
pub use domain::outcome::DeliveryOutcome;
pub use domain::release::release_label;
pub use domain::template::DeliveryTemplate;
pub use ports::CatalogClient;
pub use service::{DeliveryConfig, DeliveryService};
