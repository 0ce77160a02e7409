use std::sync::Arc;

use shared::{
    domain::{Vendor, VendorField},
    error::ValidationErrors,
};
use tracing::debug;

use crate::{
    error::ClientResult, location::LocationCascadeController, mutation::VendorMutationController,
};

/// Create-vendor form: a draft, its field errors and the location cascade.
pub struct VendorForm {
    draft: Vendor,
    errors: ValidationErrors,
    locations: Arc<LocationCascadeController>,
}

impl VendorForm {
    pub fn new(locations: Arc<LocationCascadeController>) -> Self {
        Self {
            draft: Vendor::default(),
            errors: ValidationErrors::new(),
            locations,
        }
    }

    pub async fn open(&self) {
        self.locations.load_countries().await;
    }

    pub fn draft(&self) -> &Vendor {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn locations(&self) -> &LocationCascadeController {
        &self.locations
    }

    /// Editing a field clears the error shown for it. Country, state and city
    /// go through the cascade so the draft and the selection stay in step.
    pub async fn set_field(&mut self, field: VendorField, value: impl Into<String>) {
        let value = value.into();
        match field {
            VendorField::Country => self.set_country(&value).await,
            VendorField::State => self.set_state(&value).await,
            VendorField::City => self.set_city(&value).await,
            _ => {
                *self.draft.field_mut(field) = value;
                self.errors.clear_field(field);
            }
        }
    }

    pub async fn set_country(&mut self, country_id: &str) {
        self.locations.set_country(country_id).await;
        self.sync_location().await;
        self.errors.clear_field(VendorField::Country);
    }

    pub async fn set_state(&mut self, state_id: &str) {
        self.locations.set_state(state_id).await;
        self.sync_location().await;
        self.errors.clear_field(VendorField::State);
    }

    pub async fn set_city(&mut self, city_id: &str) {
        self.locations.set_city(city_id).await;
        self.sync_location().await;
        self.errors.clear_field(VendorField::City);
    }

    async fn sync_location(&mut self) {
        let selection = self.locations.selection().await;
        self.draft.country = selection.country;
        self.draft.state = selection.state;
        self.draft.city = selection.city;
    }

    /// Field errors stay on the form after a rejected submit; a successful one
    /// starts the form over.
    pub async fn submit(&mut self, mutations: &VendorMutationController) -> ClientResult<Vendor> {
        match mutations.create(&mut self.draft).await {
            Ok(created) => {
                self.errors = ValidationErrors::new();
                self.locations.reset().await;
                Ok(created)
            }
            Err(err) => {
                if let Some(errors) = err.validation_errors() {
                    debug!(fields = errors.len(), "vendor form rejected");
                    self.errors = errors.clone();
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
