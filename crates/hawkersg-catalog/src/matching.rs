//! Resolves a stall's free-text hawker-centre name to a known centre.
//!
//! Names are reduced to their distinctive letters (generic words like
//! "market" or "blk", digits and punctuation removed) and compared first for
//! equality, then by character-set overlap.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::bytes::Regex;

use hawkersg_core::HawkerCenter;

/// Minimum similarity, exclusive, for a fuzzy match to be accepted.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.35;

static STOPWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?-u:\b)(?:hawker|centre|center|food|market|blk|block|road|street|st|avenue|ave|rd|drive|dr|lane|ln|#|no|unit)(?-u:\b)",
    )
    .expect("valid stopword regex")
});

/// Lowercases, drops stopwords as whole words, then keeps only `a`-`z`.
#[must_use]
pub fn normalize_centre_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let stripped = STOPWORD_RE.replace_all(lower.as_bytes(), &b""[..]);
    stripped
        .iter()
        .filter(|b| b.is_ascii_lowercase())
        .map(|b| char::from(*b))
        .collect()
}

/// Shared distinct characters over the larger distinct-character count.
/// Zero when either side is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let set_a: BTreeSet<char> = a.chars().collect();
    let set_b: BTreeSet<char> = b.chars().collect();
    let shared = set_a.intersection(&set_b).count();
    shared as f64 / set_a.len().max(set_b.len()) as f64
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Exact { hawker_id: String },
    Fuzzy { hawker_id: String, score: f64 },
    /// No centre scored above the threshold. `best_score` is the highest
    /// seen (0 when there were no candidates).
    Unresolved { best_score: f64 },
}

impl Resolution {
    #[must_use]
    pub fn hawker_id(&self) -> Option<&str> {
        match self {
            Resolution::Exact { hawker_id } | Resolution::Fuzzy { hawker_id, .. } => {
                Some(hawker_id.as_str())
            }
            Resolution::Unresolved { .. } => None,
        }
    }
}

/// Normalized names of every hawker centre in a catalog, built once per
/// normalization run.
#[derive(Debug)]
pub struct HawkerNameIndex<'a> {
    /// In input order, for the fuzzy scan.
    candidates: Vec<(String, &'a HawkerCenter)>,
    /// Exact lookup. A later centre with the same normalized name replaces
    /// an earlier one.
    exact: HashMap<String, &'a HawkerCenter>,
}

impl<'a> HawkerNameIndex<'a> {
    #[must_use]
    pub fn new(hawkers: &'a [HawkerCenter]) -> Self {
        let candidates: Vec<(String, &HawkerCenter)> = hawkers
            .iter()
            .map(|h| (normalize_centre_name(&h.name), h))
            .collect();
        let exact = candidates
            .iter()
            .map(|(name, h)| (name.clone(), *h))
            .collect();
        Self { candidates, exact }
    }

    /// Resolves raw hawker-centre text.
    ///
    /// Text that normalizes to nothing still matches a centre whose name
    /// also normalizes to nothing (e.g. "Food Centre"). Otherwise it scores
    /// 0 against everything and stays unresolved.
    #[must_use]
    pub fn resolve(&self, raw_centre: &str) -> Resolution {
        let needle = normalize_centre_name(raw_centre);
        if let Some(h) = self.exact.get(&needle) {
            return Resolution::Exact {
                hawker_id: h.id.clone(),
            };
        }

        let mut best: Option<&HawkerCenter> = None;
        let mut best_score = 0.0;
        for (name, h) in &self.candidates {
            let score = similarity(&needle, name);
            if score > best_score {
                best_score = score;
                best = Some(h);
            }
        }

        match best {
            Some(h) if best_score > FUZZY_MATCH_THRESHOLD => Resolution::Fuzzy {
                hawker_id: h.id.clone(),
                score: best_score,
            },
            _ => Resolution::Unresolved { best_score },
        }
    }
}
