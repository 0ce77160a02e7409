//! Client-side state for the vendor management front-end: a typed REST client,
//! list/selection/pagination state, the location cascade and the mutation
//! paths that reconcile the list after a write.

pub mod activity;
pub mod api;
pub mod config;
pub mod email;
pub mod error;
pub mod events;
pub mod export;
pub mod form;
pub mod list;
pub mod location;
pub mod mutation;
pub mod search;

pub use activity::ActivityLogViewer;
pub use api::{EmailApi, LocationApi, RestClient, VendorApi};
pub use config::{load_settings, ClientSettings};
pub use email::EmailComposer;
pub use error::{ClientError, ClientResult};
pub use events::VendorEvent;
pub use form::VendorForm;
pub use list::{SortConfig, SortDirection, VendorListController};
pub use location::{LocationCascadeController, LocationSelection, LocationSnapshot};
pub use mutation::{BulkDeleteReport, BulkDeleteStatus, VendorMutationController};
pub use search::{search_into, SearchOutcome};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
