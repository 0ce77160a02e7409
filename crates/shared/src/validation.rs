use std::sync::LazyLock;

use regex::Regex;

use crate::{
    domain::{Vendor, VendorField, VendorType},
    error::ValidationErrors,
};

pub const REQUIRED_FIELDS: [VendorField; 10] = [
    VendorField::VendorNumber,
    VendorField::Company,
    VendorField::FirstName,
    VendorField::Address1,
    VendorField::Phone1,
    VendorField::Email,
    VendorField::Country,
    VendorField::State,
    VendorField::City,
    VendorField::VendorType,
];

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is a valid regex")
});

pub fn is_plausible_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

pub fn validate_vendor(vendor: &Vendor) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for field in REQUIRED_FIELDS {
        if vendor.field(field).trim().is_empty() {
            errors.insert(field, format!("{} is required", field.label()));
        }
    }

    if !vendor.email.is_empty() && !is_plausible_email(&vendor.email) {
        errors.insert(VendorField::Email, "Invalid email format");
    }

    if !vendor.vendor_type.trim().is_empty() && vendor.vendor_type.parse::<VendorType>().is_err() {
        errors.insert(
            VendorField::VendorType,
            format!("Vendor Type must be one of {}", vendor_type_choices()),
        );
    }

    errors.into_result()
}

fn vendor_type_choices() -> String {
    VendorType::ALL
        .iter()
        .map(VendorType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
