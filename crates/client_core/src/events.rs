use shared::domain::{Vendor, VendorId};

/// Broadcast to observers after a mutation settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorEvent {
    /// Carries no payload; observers re-run their search if they need the new row.
    Created,
    Updated(Vendor),
    Deleted(Vec<VendorId>),
    Error(String),
}
