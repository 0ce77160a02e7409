use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder,
};
use shared::{
    domain::{ActivityLog, ExportFormat, LocationOption, Vendor, VendorId},
    protocol::{EmailAttachment, EmailMessage, VendorUpload},
};
use tracing::{debug, error};

use crate::{
    config::{normalize_base_url, ClientSettings},
    error::{ClientError, ClientResult},
};

#[async_trait]
pub trait VendorApi: Send + Sync {
    async fn list_vendors(&self) -> ClientResult<Vec<Vendor>>;
    async fn search_vendors(&self, query: &str) -> ClientResult<Vec<Vendor>>;
    async fn create_vendor(&self, vendor: &Vendor) -> ClientResult<Vendor>;
    async fn update_vendor(&self, id: VendorId, vendor: &Vendor) -> ClientResult<Vendor>;
    async fn delete_vendor(&self, id: VendorId) -> ClientResult<String>;
    async fn bulk_delete_vendors(&self, ids: &[VendorId]) -> ClientResult<()>;
    async fn download_export(&self, format: ExportFormat) -> ClientResult<Vec<u8>>;
    async fn upload_vendors(&self, upload: VendorUpload) -> ClientResult<String>;
    async fn activity_logs(&self) -> ClientResult<Vec<ActivityLog>>;
}

#[async_trait]
pub trait LocationApi: Send + Sync {
    async fn countries(&self) -> ClientResult<Vec<LocationOption>>;
    async fn states(&self, country_id: &str) -> ClientResult<Vec<LocationOption>>;
    async fn cities(&self, state_id: &str) -> ClientResult<Vec<LocationOption>>;
}

#[async_trait]
pub trait EmailApi: Send + Sync {
    async fn send_email(
        &self,
        message: &EmailMessage,
        attachment: Option<EmailAttachment>,
    ) -> ClientResult<serde_json::Value>;
    async fn send_plain_email(&self, message: &EmailMessage) -> ClientResult<String>;
}

/// HTTP implementation of every API seam against one backend.
#[derive(Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn from_settings(settings: &ClientSettings) -> ClientResult<Self> {
        Self::with_timeout(&settings.api_base_url, settings.request_timeout)
    }

    fn with_timeout(base_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let base_url = normalize_base_url(base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(ClientError::network("build http client"))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn vendors_url(&self, path: &str) -> String {
        if path.is_empty() {
            format!("{}/api/vendors", self.base_url)
        } else {
            format!("{}/api/vendors/{path}", self.base_url)
        }
    }

    fn location_url(&self, path: &str) -> String {
        format!("{}/api/location/{path}", self.base_url)
    }

    fn email_url(&self, path: &str) -> String {
        format!("{}/api/email/{path}", self.base_url)
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> ClientResult<reqwest::Response> {
        debug!(operation, "sending api request");
        let response = request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);
        response.map_err(|source| {
            error!(operation, status = ?source.status(), "api request failed: {source}");
            ClientError::Network { operation, source }
        })
    }

    async fn json<T: serde::de::DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        self.send(operation, request)
            .await?
            .json()
            .await
            .map_err(ClientError::network(operation))
    }

    async fn text(&self, operation: &'static str, request: RequestBuilder) -> ClientResult<String> {
        self.send(operation, request)
            .await?
            .text()
            .await
            .map_err(ClientError::network(operation))
    }
}

fn file_part(
    operation: &'static str,
    bytes: Vec<u8>,
    file_name: String,
    mime_type: Option<&str>,
) -> ClientResult<Part> {
    let part = Part::bytes(bytes).file_name(file_name);
    match mime_type {
        Some(mime) => part.mime_str(mime).map_err(ClientError::network(operation)),
        None => Ok(part),
    }
}

#[async_trait]
impl VendorApi for RestClient {
    async fn list_vendors(&self) -> ClientResult<Vec<Vendor>> {
        self.json("fetch vendors", self.http.get(self.vendors_url("")))
            .await
    }

    async fn search_vendors(&self, query: &str) -> ClientResult<Vec<Vendor>> {
        let request = self
            .http
            .get(self.vendors_url("search"))
            .query(&[("query", query)]);
        self.json("fetch vendors", request).await
    }

    async fn create_vendor(&self, vendor: &Vendor) -> ClientResult<Vendor> {
        let request = self.http.post(self.vendors_url("")).json(vendor);
        self.json("create vendor", request).await
    }

    async fn update_vendor(&self, id: VendorId, vendor: &Vendor) -> ClientResult<Vendor> {
        let request = self
            .http
            .put(self.vendors_url(&id.0.to_string()))
            .json(vendor);
        self.json("update vendor", request).await
    }

    async fn delete_vendor(&self, id: VendorId) -> ClientResult<String> {
        let request = self.http.delete(self.vendors_url(&id.0.to_string()));
        self.text("delete vendor", request).await
    }

    async fn bulk_delete_vendors(&self, ids: &[VendorId]) -> ClientResult<()> {
        let request = self.http.delete(self.vendors_url("bulk-delete")).json(ids);
        self.send("delete vendors", request).await?;
        Ok(())
    }

    async fn download_export(&self, format: ExportFormat) -> ClientResult<Vec<u8>> {
        let operation = match format {
            ExportFormat::Csv => "download csv",
            ExportFormat::Xml => "download xml",
            ExportFormat::Excel => "download excel",
        };
        let bytes = self
            .send(operation, self.http.get(self.vendors_url(format.endpoint())))
            .await?
            .bytes()
            .await
            .map_err(ClientError::network(operation))?;
        Ok(bytes.to_vec())
    }

    async fn upload_vendors(&self, upload: VendorUpload) -> ClientResult<String> {
        let part = file_part(
            "upload vendors",
            upload.bytes,
            upload.file_name,
            upload.mime_type.as_deref(),
        )?;
        let request = self
            .http
            .post(self.vendors_url("upload"))
            .multipart(Form::new().part("file", part));
        self.text("upload vendors", request).await
    }

    async fn activity_logs(&self) -> ClientResult<Vec<ActivityLog>> {
        self.json(
            "fetch activity logs",
            self.http.get(self.vendors_url("activity-logs")),
        )
        .await
    }
}

#[async_trait]
impl LocationApi for RestClient {
    async fn countries(&self) -> ClientResult<Vec<LocationOption>> {
        self.json("fetch countries", self.http.get(self.location_url("countries")))
            .await
    }

    async fn states(&self, country_id: &str) -> ClientResult<Vec<LocationOption>> {
        let url = self.location_url(&format!("states/{country_id}"));
        self.json("fetch states", self.http.get(url)).await
    }

    async fn cities(&self, state_id: &str) -> ClientResult<Vec<LocationOption>> {
        let url = self.location_url(&format!("cities/{state_id}"));
        self.json("fetch cities", self.http.get(url)).await
    }
}

#[async_trait]
impl EmailApi for RestClient {
    async fn send_email(
        &self,
        message: &EmailMessage,
        attachment: Option<EmailAttachment>,
    ) -> ClientResult<serde_json::Value> {
        let mut form = Form::new()
            .text("to", message.to.clone())
            .text("subject", message.subject.clone())
            .text("body", message.body.clone());
        if let Some(cc) = message.cc.as_ref().filter(|cc| !cc.is_empty()) {
            form = form.text("cc", cc.clone());
        }
        if let Some(attachment) = attachment {
            let part = file_part(
                "send email",
                attachment.bytes,
                attachment.file_name,
                attachment.mime_type.as_deref(),
            )?;
            form = form.part("attachment", part);
        }

        let response = self
            .send(
                "send email",
                self.http.post(self.email_url("send-email")).multipart(form),
            )
            .await?;
        let body = response
            .text()
            .await
            .map_err(ClientError::network("send email"))?;
        // The payload shape is server-defined; plain text is kept as a JSON string.
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }

    async fn send_plain_email(&self, message: &EmailMessage) -> ClientResult<String> {
        let request = self.http.post(self.email_url("send")).query(&[
            ("to", message.to.as_str()),
            ("cc", message.cc.as_deref().unwrap_or_default()),
            ("subject", message.subject.as_str()),
            ("body", message.body.as_str()),
        ]);
        self.text("send email", request).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
