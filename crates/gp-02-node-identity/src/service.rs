//! Identity Provisioner
//!
//! Walks a staker store slot by slot and fills in missing identities. Each
//! slot is resolved and written before the next one starts.

use gp_01_staker_store::{KeyMaterial, RecordPatch, StakerStore, StoreError};
use shared_types::NodeId;
use tracing::{error, info, warn};

use crate::domain::errors::ResolveError;
use crate::domain::report::{ResolutionReport, SlotOutcome};
use crate::ports::IdentityResolver;

pub struct IdentityProvisioner<R: IdentityResolver> {
    resolver: R,
    reprovision: bool,
}

impl<R: IdentityResolver> IdentityProvisioner<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            reprovision: false,
        }
    }

    /// Re-resolve slots that already carry an identity, replacing it.
    pub fn with_reprovision(mut self, reprovision: bool) -> Self {
        self.reprovision = reprovision;
        self
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolve one explicit key/cert pair.
    pub async fn resolve_single(&self, key: &KeyMaterial) -> Result<NodeId, ResolveError> {
        self.resolver.resolve(key).await
    }

    /// Resolve every present slot that lacks an identity.
    ///
    /// Per-slot failures (missing key material, resolution errors) are
    /// recorded in the report and do not stop the pass. Store failures do.
    pub async fn resolve_all<S: StakerStore>(
        &self,
        store: &mut S,
    ) -> Result<ResolutionReport, StoreError> {
        let mut report = ResolutionReport::default();

        for (slot, record) in store.scan()? {
            if record.is_resolved() && !self.reprovision {
                info!("[gp-02] slot {} already resolved to {}", slot, record.id);
                report.push(slot, SlotOutcome::AlreadyResolved);
                continue;
            }

            let key = match store.key_material(slot) {
                Ok(key) => key,
                Err(e @ StoreError::KeyMaterialMissing { .. }) => {
                    warn!("[gp-02] skipping slot {}: {}", slot, e);
                    report.push(slot, SlotOutcome::Skipped(e.to_string()));
                    continue;
                }
                Err(e) => return Err(e),
            };

            let id = match self.resolver.resolve(&key).await {
                Ok(id) => id,
                Err(e) => {
                    error!("[gp-02] slot {} resolution failed: {}", slot, e);
                    report.push(slot, SlotOutcome::Failed(e.to_string()));
                    continue;
                }
            };

            let mut patch = RecordPatch::identity(id);
            patch.reprovision = self.reprovision;
            store.write(slot, &patch)?;

            info!("[gp-02] slot {} resolved to {}", slot, id);
            report.push(slot, SlotOutcome::Resolved(id));
        }

        info!(
            "[gp-02] resolution pass: {} resolved, {} already resolved, {} skipped, {} failed",
            report.resolved(),
            report.already_resolved(),
            report.skipped(),
            report.failed()
        );
        Ok(report)
    }
}
