pub mod error;
pub mod models;
pub mod rating;
mod provider;
mod raw;
mod registry;

pub use crate::provider::EnrichmentCache;
pub use crate::raw::{RawCard, RawSet};
pub use crate::registry::{LoadWarning, Registry};
