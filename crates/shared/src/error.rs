use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::domain::VendorField;

/// Field-keyed messages that block a vendor from being submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} invalid field(s): {}", .fields.len(), summarize(.fields))]
pub struct ValidationErrors {
    fields: BTreeMap<VendorField, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: VendorField, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn clear_field(&mut self, field: VendorField) {
        self.fields.remove(&field);
    }

    pub fn get(&self, field: VendorField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: VendorField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VendorField, &str)> {
        self.fields
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn summarize(fields: &BTreeMap<VendorField, String>) -> String {
    fields
        .keys()
        .map(VendorField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
