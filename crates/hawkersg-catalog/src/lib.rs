pub mod client;
pub mod cuisine;
pub mod diagnostics;
pub mod draft;
pub mod error;
pub mod matching;
pub mod normalize;
pub(crate) mod parse;
pub mod query;
pub mod rating;
pub mod store;
pub mod types;

pub use client::{HawkerApiClient, RawCatalog};
pub use cuisine::{classify_stall, classify_text};
pub use diagnostics::{
    Diagnostic, DiagnosticKind, DiagnosticSummary, ExclusionReason, IdSource, RecordKind,
    RecordRef,
};
pub use draft::DraftHoursStore;
pub use error::CatalogError;
pub use matching::{normalize_centre_name, similarity, HawkerNameIndex, Resolution};
pub use normalize::{normalize_catalog, normalize_catalog_json, NormalizedCatalog};
pub use query::{NearbyHawker, NearbySort, NearbyStall, PriceBand, SearchHistory, StallQuery};
pub use rating::seeded_rating;
pub use store::{CatalogSnapshot, CatalogStore};
pub use types::{RawHawkerRecord, RawMenuItem, RawStallRecord};
