use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);
    };
}

id_newtype!(VendorId);
id_newtype!(ActivityLogId);

impl VendorId {
    /// The server assigns ids; zero marks a draft that was never persisted.
    pub fn is_unassigned(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts `null` (and a missing key, through `#[serde(default)]`) as an empty string.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

macro_rules! vendor_record {
    ($( $field:ident => $variant:ident, $wire:literal, $label:literal; )+) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct Vendor {
            #[serde(default, skip_serializing_if = "VendorId::is_unassigned")]
            pub id: VendorId,
            $(
                #[serde(default, deserialize_with = "nullable_string")]
                pub $field: String,
            )+
        }

        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum VendorField {
            $( $variant, )+
        }

        impl VendorField {
            pub const ALL: &'static [VendorField] = &[$( VendorField::$variant, )+];

            /// camelCase name used on the wire and as the form input name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( VendorField::$variant => $wire, )+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $( VendorField::$variant => $label, )+
                }
            }
        }

        impl FromStr for VendorField {
            type Err = UnknownVendorField;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $( $wire => Ok(VendorField::$variant), )+
                    _ => Err(UnknownVendorField(value.to_string())),
                }
            }
        }

        impl Vendor {
            pub fn field(&self, field: VendorField) -> &str {
                match field {
                    $( VendorField::$variant => &self.$field, )+
                }
            }

            pub fn field_mut(&mut self, field: VendorField) -> &mut String {
                match field {
                    $( VendorField::$variant => &mut self.$field, )+
                }
            }
        }
    };
}

vendor_record! {
    vendor_number => VendorNumber, "vendorNumber", "Vendor Number";
    company => Company, "company", "Company";
    first_name => FirstName, "firstName", "First Name";
    last_name => LastName, "lastName", "Last Name";
    vendor_type => VendorType, "vendorType", "Vendor Type";
    vendor_code => VendorCode, "vendorCode", "Vendor Code";
    site_address => SiteAddress, "siteAddress", "Site Address";
    category => Category, "category", "Category";
    address1 => Address1, "address1", "Address 1";
    address2 => Address2, "address2", "Address 2";
    city => City, "city", "City";
    state => State, "state", "State";
    postal_code => PostalCode, "postalCode", "Postal Code";
    country => Country, "country", "Country";
    contact_via => ContactVia, "contactVia", "Contact Via";
    phone1 => Phone1, "phone1", "Phone 1";
    phone2 => Phone2, "phone2", "Phone 2";
    email => Email, "email", "Email";
    fax => Fax, "fax", "Fax";
}

impl Vendor {
    pub fn is_persisted(&self) -> bool {
        !self.id.is_unassigned()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn location_label(&self) -> String {
        match (self.city.is_empty(), self.state.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.state),
            (false, true) => self.city.clone(),
            (true, false) => self.state.clone(),
            (true, true) => String::new(),
        }
    }
}

impl fmt::Display for VendorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vendor field '{0}'")]
pub struct UnknownVendorField(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VendorType {
    Supplier,
    Distributor,
    Manufacturer,
    Retailer,
}

impl VendorType {
    pub const ALL: [VendorType; 4] = [
        VendorType::Supplier,
        VendorType::Distributor,
        VendorType::Manufacturer,
        VendorType::Retailer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VendorType::Supplier => "Supplier",
            VendorType::Distributor => "Distributor",
            VendorType::Manufacturer => "Manufacturer",
            VendorType::Retailer => "Retailer",
        }
    }
}

impl fmt::Display for VendorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VendorType {
    type Err = UnknownVendorType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        VendorType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value.trim())
            .ok_or_else(|| UnknownVendorType(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vendor type '{0}'")]
pub struct UnknownVendorType(pub String);

/// Selectable country, state or city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOption {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

impl LocationOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Signed(value) => value.to_string(),
        RawId::Unsigned(value) => value.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: ActivityLogId,
    #[serde(default, deserialize_with = "nullable_string")]
    pub action: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub performed_by: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub details: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub timestamp: String,
}

impl ActivityLog {
    /// Server timestamps arrive either zoned (RFC 3339) or as a bare local date-time.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.trim();
        if let Ok(zoned) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
            return Some(zoned.naive_local());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }

    pub fn display_timestamp(&self) -> String {
        match self.parsed_timestamp() {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => self.timestamp.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Xml,
    Excel,
}

impl ExportFormat {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "download-csv",
            ExportFormat::Xml => "download-xml",
            ExportFormat::Excel => "download-excel",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xml => "application/xml",
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "vendors.csv",
            ExportFormat::Xml => "vendors.xml",
            ExportFormat::Excel => "vendors.xlsx",
        }
    }
}
