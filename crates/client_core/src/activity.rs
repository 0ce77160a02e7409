use std::sync::Arc;

use shared::domain::ActivityLog;
use tracing::warn;

use crate::{api::VendorApi, error::ClientResult};

pub const NO_ACTIVITY_MESSAGE: &str = "No activity logs found.";

pub struct ActivityLogViewer {
    api: Arc<dyn VendorApi>,
    logs: Vec<ActivityLog>,
    loading: bool,
}

impl ActivityLogViewer {
    pub fn new(api: Arc<dyn VendorApi>) -> Self {
        Self {
            api,
            logs: Vec::new(),
            loading: false,
        }
    }

    pub fn logs(&self) -> &[ActivityLog] {
        &self.logs
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        (!self.loading && self.logs.is_empty()).then_some(NO_ACTIVITY_MESSAGE)
    }

    /// Previously loaded logs are kept when the refresh fails.
    pub async fn load(&mut self) -> ClientResult<usize> {
        self.loading = true;
        let result = self.api.activity_logs().await;
        self.loading = false;

        let logs = result.inspect_err(|err| warn!("failed to fetch activity logs: {err}"))?;
        self.logs = logs;
        Ok(self.logs.len())
    }
}

#[cfg(test)]
#[path = "tests/activity_tests.rs"]
mod tests;
