//! Read-side queries over a [`CatalogSnapshot`]: lookups, text search with
//! filters, distance-based browsing, and the recent-search list.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use hawkersg_core::{Coordinates, Cuisine, HawkerCenter, Stall};

use crate::store::CatalogSnapshot;

/// Maximum number of remembered searches.
pub const SEARCH_HISTORY_LIMIT: usize = 5;

/// Menu price bands offered by the stall search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    /// Cheapest dish under $3.
    Under3,
    /// Some dish from $3 to $5 inclusive.
    From3To5,
    From6To10,
    From11To15,
    /// Most expensive dish over $15.
    Over15,
}

impl PriceBand {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PriceBand::Under3 => "< $3",
            PriceBand::From3To5 => "$3 - $5",
            PriceBand::From6To10 => "$6 - $10",
            PriceBand::From11To15 => "$11 - $15",
            PriceBand::Over15 => "$15+",
        }
    }

    /// Whether a stall's menu falls in this band. Stalls without a menu are
    /// not priced and always match; a menu whose prices all failed to parse
    /// matches nothing.
    #[must_use]
    pub fn matches(self, stall: &Stall) -> bool {
        if stall.menu.is_empty() {
            return true;
        }
        let any_between = |lo: i64, hi: i64| {
            stall
                .prices()
                .any(|p| p >= Decimal::from(lo) && p <= Decimal::from(hi))
        };
        match self {
            PriceBand::Under3 => stall.min_price().is_some_and(|p| p < Decimal::from(3)),
            PriceBand::From3To5 => any_between(3, 5),
            PriceBand::From6To10 => any_between(6, 10),
            PriceBand::From11To15 => any_between(11, 15),
            PriceBand::Over15 => stall.max_price().is_some_and(|p| p > Decimal::from(15)),
        }
    }
}

impl std::fmt::Display for PriceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceBand {
    type Err = String;

    /// Accepts the display labels (`"$3 - $5"`) and compact forms (`"3-5"`,
    /// `"<3"`, `"15+"`), ignoring spaces and `$`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '$')
            .collect();
        match compact.as_str() {
            "<3" | "under3" => Ok(PriceBand::Under3),
            "3-5" => Ok(PriceBand::From3To5),
            "6-10" => Ok(PriceBand::From6To10),
            "11-15" => Ok(PriceBand::From11To15),
            "15+" | "over15" => Ok(PriceBand::Over15),
            _ => Err(format!(
                "unknown price band \"{s}\" (expected one of <3, 3-5, 6-10, 11-15, 15+)"
            )),
        }
    }
}

/// Stall search criteria. Every field is optional; the default matches all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StallQuery {
    /// Case-insensitive substring of the name, cuisine label or description.
    pub text: Option<String>,
    pub cuisine: Option<Cuisine>,
    pub price: Option<PriceBand>,
    pub min_rating: Option<f64>,
    pub open_only: bool,
}

impl StallQuery {
    #[must_use]
    pub fn matches(&self, stall: &Stall) -> bool {
        if let Some(text) = self.text.as_deref() {
            let needle = text.to_lowercase();
            let hit = stall.name.to_lowercase().contains(&needle)
                || stall.cuisine.label().to_lowercase().contains(&needle)
                || stall.description.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        if self.cuisine.is_some_and(|c| c != stall.cuisine) {
            return false;
        }
        if self.price.is_some_and(|band| !band.matches(stall)) {
            return false;
        }
        if self.min_rating.is_some_and(|min| stall.rating < min) {
            return false;
        }
        !self.open_only || stall.is_open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NearbySort {
    #[default]
    Distance,
    Rating,
}

impl FromStr for NearbySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "distance" => Ok(NearbySort::Distance),
            "rating" => Ok(NearbySort::Rating),
            other => Err(format!("unknown sort \"{other}\" (expected distance or rating)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyHawker<'a> {
    pub hawker: &'a HawkerCenter,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyStall<'a> {
    pub stall: &'a Stall,
    /// Distance to the stall's hawker centre.
    pub distance_km: f64,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn hawker(&self, id: &str) -> Option<&HawkerCenter> {
        self.hawkers().iter().find(|h| h.id == id)
    }

    #[must_use]
    pub fn stall(&self, id: &str) -> Option<&Stall> {
        self.stalls().iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn stall_by_license_number(&self, license_number: &str) -> Option<&Stall> {
        self.stalls()
            .iter()
            .find(|s| s.license_number == license_number)
    }

    /// Stalls linked to the hawker centre `hawker_id`, in catalog order.
    #[must_use]
    pub fn stalls_by_hawker(&self, hawker_id: &str) -> Vec<&Stall> {
        self.stalls()
            .iter()
            .filter(|s| s.hawker_id == hawker_id)
            .collect()
    }

    /// Hawker centres whose name or address contains `query`,
    /// case-insensitively. An empty query matches everything.
    #[must_use]
    pub fn search_hawkers(&self, query: &str) -> Vec<&HawkerCenter> {
        let needle = query.to_lowercase();
        self.hawkers()
            .iter()
            .filter(|h| {
                h.name.to_lowercase().contains(&needle)
                    || h.address.to_lowercase().contains(&needle)
            })
            .collect()
    }

    #[must_use]
    pub fn search_stalls(&self, query: &StallQuery) -> Vec<&Stall> {
        self.stalls().iter().filter(|s| query.matches(s)).collect()
    }

    /// Hawker centres within `radius_km` of `origin` (inclusive).
    /// Sorting is stable, so ties keep catalog order.
    #[must_use]
    pub fn nearby_hawkers(
        &self,
        origin: Coordinates,
        radius_km: f64,
        sort: NearbySort,
    ) -> Vec<NearbyHawker<'_>> {
        let mut nearby: Vec<NearbyHawker<'_>> = self
            .hawkers()
            .iter()
            .map(|hawker| NearbyHawker {
                hawker,
                distance_km: origin.distance_km(&hawker.coordinates),
            })
            .filter(|n| n.distance_km <= radius_km)
            .collect();
        match sort {
            NearbySort::Distance => nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km)),
            NearbySort::Rating => nearby.sort_by(|a, b| b.hawker.rating.total_cmp(&a.hawker.rating)),
        }
        nearby
    }

    /// Stalls linked to a centre within `radius_km`, each with that centre's
    /// distance.
    #[must_use]
    pub fn nearby_stalls(
        &self,
        origin: Coordinates,
        radius_km: f64,
        sort: NearbySort,
    ) -> Vec<NearbyStall<'_>> {
        let distances: HashMap<&str, f64> = self
            .nearby_hawkers(origin, radius_km, NearbySort::Distance)
            .into_iter()
            .map(|n| (n.hawker.id.as_str(), n.distance_km))
            .collect();

        let mut nearby: Vec<NearbyStall<'_>> = self
            .stalls()
            .iter()
            .filter_map(|stall| {
                distances
                    .get(stall.hawker_id.as_str())
                    .map(|&distance_km| NearbyStall { stall, distance_km })
            })
            .collect();
        match sort {
            NearbySort::Distance => nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km)),
            NearbySort::Rating => nearby.sort_by(|a, b| b.stall.rating.total_cmp(&a.stall.rating)),
        }
        nearby
    }
}

/// Recent searches, newest first, without duplicates, at most
/// [`SEARCH_HISTORY_LIMIT`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    /// Parses the backend's `|`-separated history string. Blank entries are
    /// dropped; duplicates and overflow are removed keeping the earliest.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut history = Self::default();
        for entry in raw.split('|').map(str::trim).filter(|s| !s.is_empty()) {
            if !history.entries.iter().any(|e| e == entry)
                && history.entries.len() < SEARCH_HISTORY_LIMIT
            {
                history.entries.push(entry.to_owned());
            }
        }
        history
    }

    /// Records `query` as the most recent search. Blank queries are ignored;
    /// a repeated query moves to the front.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.entries.retain(|e| e != query);
        self.entries.insert(0, query.to_owned());
        self.entries.truncate(SEARCH_HISTORY_LIMIT);
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The `|`-separated form the backend stores.
    #[must_use]
    pub fn to_backend_string(&self) -> String {
        self.entries.join("|")
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
