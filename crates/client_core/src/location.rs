//! Country → state → city selection with dependent option lists.
//!
//! Every fetch for a dependent list is tagged with the generation of the
//! level it fills. A reply is applied only while that generation is still the
//! latest, so a slow answer for an older selection can never overwrite the
//! options of a newer one.

use std::sync::Arc;

use shared::domain::LocationOption;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::LocationApi;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSelection {
    pub country: String,
    pub state: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSnapshot {
    pub countries: Vec<LocationOption>,
    pub states: Vec<LocationOption>,
    pub cities: Vec<LocationOption>,
    pub selection: LocationSelection,
    pub last_error: Option<String>,
}

impl LocationSnapshot {
    pub fn states_enabled(&self) -> bool {
        !self.states.is_empty()
    }

    pub fn cities_enabled(&self) -> bool {
        !self.cities.is_empty()
    }
}

#[derive(Default)]
struct CascadeState {
    snapshot: LocationSnapshot,
    states_generation: u64,
    cities_generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    States,
    Cities,
}

pub struct LocationCascadeController {
    api: Arc<dyn LocationApi>,
    inner: Mutex<CascadeState>,
}

impl LocationCascadeController {
    pub fn new(api: Arc<dyn LocationApi>) -> Self {
        Self {
            api,
            inner: Mutex::new(CascadeState::default()),
        }
    }

    pub async fn snapshot(&self) -> LocationSnapshot {
        self.inner.lock().await.snapshot.clone()
    }

    pub async fn selection(&self) -> LocationSelection {
        self.inner.lock().await.snapshot.selection.clone()
    }

    /// A failed fetch leaves the country list empty; the form stays usable.
    pub async fn load_countries(&self) {
        match self.api.countries().await {
            Ok(countries) => {
                let mut guard = self.inner.lock().await;
                guard.snapshot.countries = countries;
            }
            Err(err) => {
                warn!("failed to fetch countries: {err}");
                let mut guard = self.inner.lock().await;
                guard.snapshot.countries.clear();
                guard.snapshot.last_error = Some(err.user_message());
            }
        }
    }

    pub async fn set_country(&self, country_id: &str) {
        let generation = {
            let mut guard = self.inner.lock().await;
            guard.snapshot.selection = LocationSelection {
                country: country_id.to_string(),
                ..LocationSelection::default()
            };
            guard.snapshot.states.clear();
            guard.snapshot.cities.clear();
            guard.cities_generation += 1;
            guard.states_generation += 1;
            guard.states_generation
        };

        if !country_id.is_empty() {
            self.fetch_level(Level::States, country_id, generation).await;
        }
    }

    pub async fn set_state(&self, state_id: &str) {
        let generation = {
            let mut guard = self.inner.lock().await;
            guard.snapshot.selection.state = state_id.to_string();
            guard.snapshot.selection.city.clear();
            guard.snapshot.cities.clear();
            guard.cities_generation += 1;
            guard.cities_generation
        };

        if !state_id.is_empty() {
            self.fetch_level(Level::Cities, state_id, generation).await;
        }
    }

    pub async fn set_city(&self, city_id: &str) {
        let mut guard = self.inner.lock().await;
        guard.snapshot.selection.city = city_id.to_string();
    }

    /// Loads an existing record's location without clearing the lower levels,
    /// then fills both dependent lists for it.
    pub async fn restore(&self, country_id: &str, state_id: &str, city_id: &str) {
        let (states_generation, cities_generation) = {
            let mut guard = self.inner.lock().await;
            guard.snapshot.selection = LocationSelection {
                country: country_id.to_string(),
                state: state_id.to_string(),
                city: city_id.to_string(),
            };
            guard.snapshot.states.clear();
            guard.snapshot.cities.clear();
            guard.states_generation += 1;
            guard.cities_generation += 1;
            (guard.states_generation, guard.cities_generation)
        };

        if !country_id.is_empty() {
            self.fetch_level(Level::States, country_id, states_generation)
                .await;
        }
        if !state_id.is_empty() {
            self.fetch_level(Level::Cities, state_id, cities_generation)
                .await;
        }
    }

    /// Clears the selection and dependent lists; the country list is kept.
    pub async fn reset(&self) {
        let mut guard = self.inner.lock().await;
        guard.snapshot.selection = LocationSelection::default();
        guard.snapshot.states.clear();
        guard.snapshot.cities.clear();
        guard.snapshot.last_error = None;
        guard.states_generation += 1;
        guard.cities_generation += 1;
    }

    async fn fetch_level(&self, level: Level, parent_id: &str, generation: u64) {
        let result = match level {
            Level::States => self.api.states(parent_id).await,
            Level::Cities => self.api.cities(parent_id).await,
        };

        let mut guard = self.inner.lock().await;
        let latest = match level {
            Level::States => guard.states_generation,
            Level::Cities => guard.cities_generation,
        };
        if latest != generation {
            debug!(?level, parent_id, generation, latest, "discarding stale location reply");
            return;
        }

        let options = match result {
            Ok(options) => options,
            Err(err) => {
                warn!(?level, parent_id, "failed to fetch location options: {err}");
                guard.snapshot.last_error = Some(err.user_message());
                Vec::new()
            }
        };
        match level {
            Level::States => guard.snapshot.states = options,
            Level::Cities => guard.snapshot.cities = options,
        }
    }
}

#[cfg(test)]
#[path = "tests/location_tests.rs"]
mod tests;
