use serde::{Deserialize, Serialize};

pub const SEARCH_VENDOR_TYPES: [&str; 3] = ["Supplier", "Distributor", "Retailer"];

pub const SEARCH_LOCATION_TYPES: [&str; 4] = [
    "Air Carrier",
    "Bus Carrier",
    "Pickup/Delivery",
    "Third Party Carrier",
];

/// Free-form filters from the search form; matching happens on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub vendor_number: Option<String>,
    pub company: Option<String>,
    #[serde(rename = "type")]
    pub vendor_type: Option<String>,
    pub location_type: Option<String>,
}

impl SearchCriteria {
    pub fn to_query(&self) -> String {
        [
            &self.vendor_number,
            &self.company,
            &self.vendor_type,
            &self.location_type,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Vendor spreadsheet handed to the import endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorUpload {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
