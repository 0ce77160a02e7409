//! In-memory API fakes shared by the controller tests.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use shared::{
    domain::{ActivityLog, ExportFormat, LocationOption, Vendor, VendorId},
    protocol::{EmailAttachment, EmailMessage, VendorUpload},
};

use crate::{
    api::{EmailApi, LocationApi, VendorApi},
    error::{ClientError, ClientResult},
};

pub fn vendor(id: i64, number: &str) -> Vendor {
    Vendor {
        id: VendorId(id),
        vendor_number: number.to_string(),
        company: format!("Company {id}"),
        ..Vendor::default()
    }
}

pub fn complete_draft() -> Vendor {
    Vendor {
        vendor_number: "V-500".into(),
        company: "Acme Freight".into(),
        first_name: "Ada".into(),
        address1: "1 Dock Road".into(),
        phone1: "555-0100".into(),
        email: "ada@acme.example".into(),
        country: "FR".into(),
        state: "IDF".into(),
        city: "PAR".into(),
        vendor_type: "Supplier".into(),
        ..Vendor::default()
    }
}

#[derive(Default)]
pub struct FakeVendorApi {
    pub search_results: Vec<Vendor>,
    pub failing_deletes: HashSet<VendorId>,
    pub offline: bool,
    pub exports: HashMap<ExportFormat, Vec<u8>>,
    pub logs: Vec<ActivityLog>,
    pub calls: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<VendorUpload>>,
}

impl FakeVendorApi {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_search_results(mut self, results: Vec<Vendor>) -> Self {
        self.search_results = results;
        self
    }

    pub fn failing_delete(mut self, id: i64) -> Self {
        self.failing_deletes.insert(VendorId(id));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn uploads(&self) -> Vec<VendorUpload> {
        self.uploads.lock().expect("uploads lock").clone()
    }

    fn record(&self, operation: &'static str, call: String) -> ClientResult<()> {
        self.calls.lock().expect("calls lock").push(call);
        if self.offline {
            Err(ClientError::unavailable(operation, "connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl VendorApi for FakeVendorApi {
    async fn list_vendors(&self) -> ClientResult<Vec<Vendor>> {
        self.record("fetch vendors", "list".into())?;
        Ok(self.search_results.clone())
    }

    async fn search_vendors(&self, query: &str) -> ClientResult<Vec<Vendor>> {
        self.record("fetch vendors", format!("search:{query}"))?;
        Ok(self.search_results.clone())
    }

    async fn create_vendor(&self, vendor: &Vendor) -> ClientResult<Vendor> {
        self.record("create vendor", format!("create:{}", vendor.vendor_number))?;
        Ok(Vendor {
            id: VendorId(900),
            ..vendor.clone()
        })
    }

    async fn update_vendor(&self, id: VendorId, vendor: &Vendor) -> ClientResult<Vendor> {
        self.record("update vendor", format!("update:{}", id.0))?;
        // Mimics server-side normalization of the returned record.
        Ok(Vendor {
            company: vendor.company.trim().to_string(),
            ..vendor.clone()
        })
    }

    async fn delete_vendor(&self, id: VendorId) -> ClientResult<String> {
        self.record("delete vendor", format!("delete:{}", id.0))?;
        if self.failing_deletes.contains(&id) {
            return Err(ClientError::unavailable("delete vendor", "500 Internal Server Error"));
        }
        Ok("deleted".into())
    }

    async fn bulk_delete_vendors(&self, ids: &[VendorId]) -> ClientResult<()> {
        self.record("delete vendors", format!("bulk-delete:{}", ids.len()))
    }

    async fn download_export(&self, format: ExportFormat) -> ClientResult<Vec<u8>> {
        self.record("download export", format!("download:{}", format.endpoint()))?;
        Ok(self.exports.get(&format).cloned().unwrap_or_default())
    }

    async fn upload_vendors(&self, upload: VendorUpload) -> ClientResult<String> {
        self.record("upload vendors", format!("upload:{}", upload.file_name))?;
        self.uploads.lock().expect("uploads lock").push(upload);
        Ok("File uploaded successfully".into())
    }

    async fn activity_logs(&self) -> ClientResult<Vec<ActivityLog>> {
        self.record("fetch activity logs", "activity-logs".into())?;
        Ok(self.logs.clone())
    }
}

#[derive(Default)]
pub struct FakeLocationApi {
    pub children: HashMap<String, Vec<LocationOption>>,
}

impl FakeLocationApi {
    pub fn with_children(mut self, parent: &str, children: &[(&str, &str)]) -> Self {
        self.children.insert(
            parent.to_string(),
            children
                .iter()
                .map(|(id, name)| LocationOption::new(*id, *name))
                .collect(),
        );
        self
    }
}

#[async_trait]
impl LocationApi for FakeLocationApi {
    async fn countries(&self) -> ClientResult<Vec<LocationOption>> {
        Ok(vec![LocationOption::new("FR", "France")])
    }

    async fn states(&self, country_id: &str) -> ClientResult<Vec<LocationOption>> {
        Ok(self.children.get(country_id).cloned().unwrap_or_default())
    }

    async fn cities(&self, state_id: &str) -> ClientResult<Vec<LocationOption>> {
        Ok(self.children.get(state_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeEmailApi {
    pub offline: bool,
    pub sent: Mutex<Vec<(EmailMessage, Option<EmailAttachment>)>>,
}

impl FakeEmailApi {
    pub fn sent(&self) -> Vec<(EmailMessage, Option<EmailAttachment>)> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl EmailApi for FakeEmailApi {
    async fn send_email(
        &self,
        message: &EmailMessage,
        attachment: Option<EmailAttachment>,
    ) -> ClientResult<serde_json::Value> {
        if self.offline {
            return Err(ClientError::unavailable("send email", "connection refused"));
        }
        self.sent
            .lock()
            .expect("sent lock")
            .push((message.clone(), attachment));
        Ok(serde_json::json!({ "status": "sent" }))
    }

    async fn send_plain_email(&self, message: &EmailMessage) -> ClientResult<String> {
        if self.offline {
            return Err(ClientError::unavailable("send email", "connection refused"));
        }
        self.sent
            .lock()
            .expect("sent lock")
            .push((message.clone(), None));
        Ok("Email sent".into())
    }
}
