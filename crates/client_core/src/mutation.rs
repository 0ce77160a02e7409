use std::sync::Arc;

use futures::future::join_all;
use shared::{
    domain::{Vendor, VendorId},
    validation::validate_vendor,
};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    api::VendorApi,
    error::{ClientError, ClientResult},
    events::VendorEvent,
    list::VendorListController,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkDeleteStatus {
    Succeeded,
    PartiallyFailed,
    Failed,
}

/// Per-id outcome of a fanned-out delete. Nothing is rolled back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkDeleteReport {
    pub deleted: Vec<VendorId>,
    pub failed: Vec<(VendorId, String)>,
}

impl BulkDeleteReport {
    pub fn status(&self) -> BulkDeleteStatus {
        match (self.deleted.is_empty(), self.failed.is_empty()) {
            (_, true) => BulkDeleteStatus::Succeeded,
            (false, false) => BulkDeleteStatus::PartiallyFailed,
            (true, false) => BulkDeleteStatus::Failed,
        }
    }

    pub fn failed_ids(&self) -> Vec<VendorId> {
        self.failed.iter().map(|(id, _)| *id).collect()
    }

    pub fn summary(&self) -> String {
        match self.status() {
            BulkDeleteStatus::Succeeded => {
                format!("Deleted {} vendors successfully!", self.deleted.len())
            }
            BulkDeleteStatus::PartiallyFailed => format!(
                "Deleted {} vendors; {} could not be deleted.",
                self.deleted.len(),
                self.failed.len()
            ),
            BulkDeleteStatus::Failed => "Failed to delete vendors. Please try again.".to_string(),
        }
    }
}

pub struct VendorMutationController {
    api: Arc<dyn VendorApi>,
    events: broadcast::Sender<VendorEvent>,
    editing: Option<Vendor>,
}

impl VendorMutationController {
    pub fn new(api: Arc<dyn VendorApi>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            api,
            events,
            editing: None,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<VendorEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: VendorEvent) {
        // No subscribers is fine; the event is informational.
        let _ = self.events.send(event);
    }

    fn report_failure(&self, err: &ClientError) {
        self.emit(VendorEvent::Error(err.user_message()));
    }

    /// Validates before any network call. On success the draft is zeroed and
    /// the created record is returned; the list is left untouched.
    pub async fn create(&self, draft: &mut Vendor) -> ClientResult<Vendor> {
        validate_vendor(draft)?;

        let created = self.api.create_vendor(draft).await.inspect_err(|err| {
            warn!("failed to create vendor: {err}");
            self.report_failure(err);
        })?;

        info!(vendor_id = created.id.0, "vendor created");
        *draft = Vendor::default();
        self.emit(VendorEvent::Created);
        Ok(created)
    }

    pub fn open_editor(&mut self, vendor: Vendor) {
        self.editing = Some(vendor);
    }

    pub fn close_editor(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&Vendor> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut Vendor> {
        self.editing.as_mut()
    }

    /// Sends the full record and swaps the server's copy into the list in place.
    pub async fn update(
        &mut self,
        list: &mut VendorListController,
        vendor: Vendor,
    ) -> ClientResult<Vendor> {
        if !vendor.is_persisted() {
            return Err(ClientError::NotPersisted(vendor.id));
        }

        let updated = self
            .api
            .update_vendor(vendor.id, &vendor)
            .await
            .inspect_err(|err| {
                warn!(vendor_id = vendor.id.0, "failed to update vendor: {err}");
                self.report_failure(err);
            })?;

        if !list.replace_vendor(updated.clone()) {
            warn!(vendor_id = updated.id.0, "updated vendor is not in the current results");
        }
        self.editing = None;
        info!(vendor_id = updated.id.0, "vendor updated");
        self.emit(VendorEvent::Updated(updated.clone()));
        Ok(updated)
    }

    /// Callers confirm with the user before invoking this.
    pub async fn delete_one(
        &self,
        list: &mut VendorListController,
        id: VendorId,
    ) -> ClientResult<()> {
        self.api.delete_vendor(id).await.inspect_err(|err| {
            warn!(vendor_id = id.0, "failed to delete vendor: {err}");
            self.report_failure(err);
        })?;

        list.remove_ids(&[id]);
        info!(vendor_id = id.0, "vendor deleted");
        self.emit(VendorEvent::Deleted(vec![id]));
        Ok(())
    }

    /// Issues one delete per id concurrently and waits for all of them. Ids
    /// whose delete succeeded leave the list; failed ids stay listed.
    pub async fn delete_many(
        &self,
        list: &mut VendorListController,
        ids: &[VendorId],
    ) -> BulkDeleteReport {
        let api = &self.api;
        let outcomes = join_all(ids.iter().map(|id| async move {
            (*id, api.delete_vendor(*id).await)
        }))
        .await;

        let mut report = BulkDeleteReport::default();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(_) => report.deleted.push(id),
                Err(err) => {
                    warn!(vendor_id = id.0, "failed to delete vendor: {err}");
                    report.failed.push((id, err.to_string()));
                }
            }
        }

        list.remove_ids(&report.deleted);
        info!(
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            "bulk delete finished"
        );
        if !report.deleted.is_empty() {
            self.emit(VendorEvent::Deleted(report.deleted.clone()));
        }
        if !report.failed.is_empty() {
            self.emit(VendorEvent::Error(report.summary()));
        }
        report
    }
}

#[cfg(test)]
#[path = "tests/mutation_tests.rs"]
mod tests;
