//! Normalization from raw backend records to the catalog's
//! [`HawkerCenter`] and [`Stall`] lists.
//!
//! Runs in one synchronous pass over already-fetched arrays:
//!
//! 1. every hawker record is shaped with defaults (never dropped);
//! 2. stalls with unusable names are dropped;
//! 3. surviving stalls are classified, rated and shaped;
//! 4. each stall is linked to a hawker centre by name and the centres'
//!    stall counts are recomputed from those links.
//!
//! Nothing here fails. Defaults, exclusions and unresolved links are
//! reported through [`NormalizedCatalog::diagnostics`].

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use hawkersg_core::{
    Coordinates, Cuisine, HawkerCenter, Stall, WeeklySchedule, PLACEHOLDER_HAWKER_IMAGE,
};

use crate::cuisine::classify_stall;
use crate::diagnostics::{
    Diagnostic, DiagnosticKind, DiagnosticSummary, ExclusionReason, IdSource,
};
use crate::matching::{HawkerNameIndex, Resolution};
use crate::rating::seeded_rating;
use crate::types::{
    parse_hawker_records, parse_stall_records, RawHawkerRecord, RawMenuItem, RawStallRecord,
};

/// Name used for hawker centres whose record carries none.
pub const DEFAULT_HAWKER_NAME: &str = "Hawker Centre";

/// Every normalized stall starts at the cheapest price tier.
pub const DEFAULT_PRICE_RANGE: &str = "$";

const FREE_WEBMAIL_DOMAINS: [&str; 3] = ["@gmail.com", "@icloud.com", "@yahoo.com"];

/// Compared after whitespace removal and lowercasing.
const PLACEHOLDER_NAMES: [&str; 10] = [
    "null",
    "undefined",
    "n/a",
    "na",
    "-",
    "nil",
    "nosignboard",
    "(nosignboard)",
    "noname",
    "none",
];

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedCatalog {
    pub hawkers: Vec<HawkerCenter>,
    pub stalls: Vec<Stall>,
    /// Not part of the catalog proper; excluded from serialized snapshots.
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl NormalizedCatalog {
    #[must_use]
    pub fn summary(&self) -> DiagnosticSummary {
        DiagnosticSummary::from_diagnostics(&self.diagnostics)
    }
}

/// Parses and normalizes the raw `/hawkers` and `/stalls` JSON arrays.
#[must_use]
pub fn normalize_catalog_json(hawkers: &[Value], stalls: &[Value]) -> NormalizedCatalog {
    let (raw_hawkers, mut diagnostics) = parse_hawker_records(hawkers);
    let (raw_stalls, stall_diagnostics) = parse_stall_records(stalls);
    diagnostics.extend(stall_diagnostics);

    let mut catalog = normalize_catalog(&raw_hawkers, &raw_stalls);
    diagnostics.append(&mut catalog.diagnostics);
    catalog.diagnostics = diagnostics;
    catalog
}

/// Normalizes parsed raw records. Pure: the same input always yields the
/// same output, field for field and in the same order.
#[must_use]
pub fn normalize_catalog(
    raw_hawkers: &[RawHawkerRecord],
    raw_stalls: &[RawStallRecord],
) -> NormalizedCatalog {
    let mut diagnostics = Vec::new();

    let mut hawkers: Vec<HawkerCenter> = raw_hawkers
        .iter()
        .enumerate()
        .map(|(index, raw)| shape_hawker(index, raw, &mut diagnostics))
        .collect();

    let mut stalls = Vec::with_capacity(raw_stalls.len());
    for (index, raw) in raw_stalls.iter().enumerate() {
        if let Some(reason) = stall_exclusion(raw) {
            let id = raw.id.as_deref().unwrap_or_default();
            tracing::debug!(stall_index = index, stall_id = %id, reason = %reason, "stall excluded");
            diagnostics.push(Diagnostic::stall(
                index,
                id,
                DiagnosticKind::StallExcluded { reason },
            ));
            continue;
        }
        stalls.push((index, shape_stall(index, raw, &mut diagnostics)));
    }
    let excluded = raw_stalls.len() - stalls.len();

    let counts = link_stalls(&hawkers, &mut stalls, &mut diagnostics);
    for hawker in &mut hawkers {
        hawker.stall_count = counts.get(&hawker.id).copied().unwrap_or(0);
    }

    let stalls: Vec<Stall> = stalls.into_iter().map(|(_, stall)| stall).collect();
    let unresolved = diagnostics
        .iter()
        .filter(|d| matches!(d.kind, DiagnosticKind::HawkerUnresolved { .. }))
        .count();

    tracing::info!(
        hawkers = hawkers.len(),
        stalls_received = raw_stalls.len(),
        stalls_kept = stalls.len(),
        stalls_excluded = excluded,
        stalls_unresolved = unresolved,
        "catalog normalized"
    );

    NormalizedCatalog {
        hawkers,
        stalls,
        diagnostics,
    }
}

/// Applies the per-field defaults to one hawker record.
pub fn shape_hawker(
    index: usize,
    raw: &RawHawkerRecord,
    diagnostics: &mut Vec<Diagnostic>,
) -> HawkerCenter {
    let (id, id_source) = resolve_hawker_id(raw);
    if let Some(source) = id_source {
        diagnostics.push(Diagnostic::hawker(
            index,
            &id,
            DiagnosticKind::IdDefaulted { source },
        ));
    }

    let image = match raw.image.as_deref() {
        Some(image) if !image.trim().is_empty() => image.to_owned(),
        _ => {
            diagnostics.push(Diagnostic::hawker(index, &id, DiagnosticKind::ImageDefaulted));
            PLACEHOLDER_HAWKER_IMAGE.to_owned()
        }
    };

    let nested = raw.coordinates.unwrap_or_default();
    let lat = nested.lat.or(raw.latitude);
    let lng = nested.lng.or(raw.longitude);
    if lat.is_none() || lng.is_none() {
        diagnostics.push(Diagnostic::hawker(
            index,
            &id,
            DiagnosticKind::CoordinatesDefaulted,
        ));
    }

    HawkerCenter {
        name: raw
            .name
            .clone()
            .or_else(|| raw.hawker_name.clone())
            .unwrap_or_else(|| DEFAULT_HAWKER_NAME.to_owned()),
        address: raw.address.clone().unwrap_or_default(),
        description: raw.description.clone().unwrap_or_default(),
        image,
        rating: raw.rating.unwrap_or(0.0),
        stall_count: raw.stall_count.unwrap_or(0),
        coordinates: Coordinates::new(lat.unwrap_or(0.0), lng.unwrap_or(0.0)),
        id,
    }
}

/// `id`, then `hawker_id`, then `slug`, then the lowercased name with
/// whitespace runs replaced by `_`, then empty. The second element names the
/// fallback used, if any.
fn resolve_hawker_id(raw: &RawHawkerRecord) -> (String, Option<IdSource>) {
    if let Some(id) = &raw.id {
        return (id.clone(), None);
    }
    if let Some(id) = &raw.hawker_id {
        return (id.clone(), Some(IdSource::HawkerId));
    }
    if let Some(slug) = &raw.slug {
        return (slug.clone(), Some(IdSource::Slug));
    }
    if let Some(name) = &raw.name {
        let slug = WHITESPACE_RUN.replace_all(&name.to_lowercase(), "_").into_owned();
        return (slug, Some(IdSource::SlugifiedName));
    }
    (String::new(), Some(IdSource::Empty))
}

/// Why a stall record is unusable, checked in a fixed order; `None` keeps it.
#[must_use]
pub fn stall_exclusion(raw: &RawStallRecord) -> Option<ExclusionReason> {
    let name = raw.stall_name.as_deref().unwrap_or_default().trim();
    let licensee = raw.licensee_name.as_deref().unwrap_or_default().trim();
    let licensee_lower = licensee.to_lowercase();

    if FREE_WEBMAIL_DOMAINS
        .iter()
        .any(|domain| licensee_lower.contains(domain))
    {
        return Some(ExclusionReason::FreeWebmailLicensee);
    }
    if name.is_empty() {
        return Some(ExclusionReason::EmptyName);
    }

    let name_lower = name.to_lowercase();
    let collapsed: String = name_lower.chars().filter(|c| !c.is_whitespace()).collect();
    if PLACEHOLDER_NAMES.contains(&collapsed.as_str()) {
        return Some(ExclusionReason::PlaceholderName);
    }
    if !licensee.is_empty() && name_lower == licensee_lower {
        return Some(ExclusionReason::OwnerName);
    }
    None
}

fn shape_stall(index: usize, raw: &RawStallRecord, diagnostics: &mut Vec<Diagnostic>) -> Stall {
    let name = raw.stall_name.as_deref().unwrap_or_default().trim().to_owned();
    let id = raw.id.clone().unwrap_or_default();

    let cuisine = classify_stall(
        raw.stall_name.as_deref(),
        raw.description.as_deref(),
        raw.establishment_address.as_deref(),
    );
    if cuisine == Cuisine::Others {
        diagnostics.push(Diagnostic::stall(index, &id, DiagnosticKind::CuisineDefaulted));
    }

    let rating = match raw.rating {
        Some(rating) if rating != 0.0 => rating,
        _ => {
            let seed = raw.id.as_deref().unwrap_or(&name);
            let rating = seeded_rating(seed);
            diagnostics.push(Diagnostic::stall(
                index,
                &id,
                DiagnosticKind::RatingSynthesized { rating },
            ));
            rating
        }
    };

    let images = raw
        .photo
        .as_ref()
        .filter(|photo| !photo.is_empty())
        .map(|photo| vec![photo.clone()])
        .unwrap_or_default();

    let menu = raw
        .menu
        .as_ref()
        .map(|items| items.iter().cloned().map(RawMenuItem::into_menu_item).collect())
        .unwrap_or_default();

    Stall {
        hawker_id: raw.hawker_centre.clone().unwrap_or_default(),
        name,
        license_number: raw.license_number.clone().unwrap_or_default(),
        description: raw.description.clone().unwrap_or_default(),
        cuisine,
        location: raw.establishment_address.clone().unwrap_or_default(),
        images,
        rating,
        review_count: raw.review_count.unwrap_or(0),
        price_range: DEFAULT_PRICE_RANGE.to_owned(),
        is_open: raw.is_open,
        menu,
        operating_hours: WeeklySchedule::default(),
        id,
    }
}

/// Rewrites each stall's `hawker_id` to the matched centre's id and returns
/// linked-stall counts keyed by centre id. Unmatched stalls keep their raw
/// text and are not counted.
fn link_stalls(
    hawkers: &[HawkerCenter],
    stalls: &mut [(usize, Stall)],
    diagnostics: &mut Vec<Diagnostic>,
) -> HashMap<String, u32> {
    let index = HawkerNameIndex::new(hawkers);
    let mut counts: HashMap<String, u32> = HashMap::new();

    for (raw_index, stall) in stalls.iter_mut() {
        match index.resolve(&stall.hawker_id) {
            Resolution::Exact { hawker_id } | Resolution::Fuzzy { hawker_id, .. } => {
                *counts.entry(hawker_id.clone()).or_insert(0) += 1;
                stall.hawker_id = hawker_id;
            }
            Resolution::Unresolved { best_score } => {
                tracing::warn!(
                    stall_id = %stall.id,
                    hawker_centre = %stall.hawker_id,
                    best_score,
                    "no hawker centre match for stall"
                );
                diagnostics.push(Diagnostic::stall(
                    *raw_index,
                    &stall.id,
                    DiagnosticKind::HawkerUnresolved {
                        raw: stall.hawker_id.clone(),
                        best_score,
                    },
                ));
            }
        }
    }
    counts
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
