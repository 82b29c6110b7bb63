//! Structured record-level diagnostics emitted alongside the normalized catalog.
//!
//! Normalization never fails on a bad record; it substitutes a default or
//! drops the stall. Each such decision is recorded here so callers can audit
//! what happened without scraping logs.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Hawker,
    Stall,
}

/// Identifies the raw record a diagnostic is about: its position in the
/// backend array and whatever id it resolved to (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRef {
    pub kind: RecordKind,
    pub index: usize,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Licensee looks like a personal free-webmail account.
    FreeWebmailLicensee,
    EmptyName,
    PlaceholderName,
    /// Stall name is just the licensee's personal name.
    OwnerName,
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ExclusionReason::FreeWebmailLicensee => "licensee is a free-webmail address",
            ExclusionReason::EmptyName => "stall name is empty",
            ExclusionReason::PlaceholderName => "stall name is a placeholder",
            ExclusionReason::OwnerName => "stall name is the licensee's name",
        };
        f.write_str(text)
    }
}

/// Where a hawker centre's id came from when the explicit `id` was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdSource {
    HawkerId,
    Slug,
    SlugifiedName,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The array element was not a JSON object; every field defaulted.
    MalformedRecord,
    IdDefaulted { source: IdSource },
    ImageDefaulted,
    CoordinatesDefaulted,
    StallExcluded { reason: ExclusionReason },
    RatingSynthesized { rating: f64 },
    CuisineDefaulted,
    HawkerUnresolved { raw: String, best_score: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub record: RecordRef,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    #[must_use]
    pub fn hawker(index: usize, id: &str, kind: DiagnosticKind) -> Self {
        Self {
            record: RecordRef {
                kind: RecordKind::Hawker,
                index,
                id: id.to_owned(),
            },
            kind,
        }
    }

    #[must_use]
    pub fn stall(index: usize, id: &str, kind: DiagnosticKind) -> Self {
        Self {
            record: RecordRef {
                kind: RecordKind::Stall,
                index,
                id: id.to_owned(),
            },
            kind,
        }
    }
}

/// Counts per diagnostic category, for one-line run summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticSummary {
    pub malformed: usize,
    pub excluded: usize,
    pub unresolved: usize,
    pub ratings_synthesized: usize,
    pub cuisine_defaulted: usize,
    pub hawker_defaults: usize,
}

impl DiagnosticSummary {
    #[must_use]
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Self::default();
        for d in diagnostics {
            match d.kind {
                DiagnosticKind::MalformedRecord => summary.malformed += 1,
                DiagnosticKind::StallExcluded { .. } => summary.excluded += 1,
                DiagnosticKind::HawkerUnresolved { .. } => summary.unresolved += 1,
                DiagnosticKind::RatingSynthesized { .. } => summary.ratings_synthesized += 1,
                DiagnosticKind::CuisineDefaulted => summary.cuisine_defaulted += 1,
                DiagnosticKind::IdDefaulted { .. }
                | DiagnosticKind::ImageDefaulted
                | DiagnosticKind::CoordinatesDefaulted => summary.hawker_defaults += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_each_category() {
        let diagnostics = vec![
            Diagnostic::stall(
                0,
                "s1",
                DiagnosticKind::StallExcluded {
                    reason: ExclusionReason::EmptyName,
                },
            ),
            Diagnostic::stall(
                1,
                "s2",
                DiagnosticKind::HawkerUnresolved {
                    raw: "Nowhere".to_owned(),
                    best_score: 0.1,
                },
            ),
            Diagnostic::hawker(0, "h1", DiagnosticKind::ImageDefaulted),
            Diagnostic::hawker(0, "h1", DiagnosticKind::CoordinatesDefaulted),
        ];
        let summary = DiagnosticSummary::from_diagnostics(&diagnostics);
        assert_eq!(summary.excluded, 1);
        assert_eq!(summary.unresolved, 1);
        assert_eq!(summary.hawker_defaults, 2);
        assert_eq!(summary.malformed, 0);
    }

    #[test]
    fn diagnostic_serializes_flat_with_kind_tag() {
        let d = Diagnostic::stall(
            3,
            "s9",
            DiagnosticKind::StallExcluded {
                reason: ExclusionReason::PlaceholderName,
            },
        );
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "stall_excluded");
        assert_eq!(json["reason"], "placeholder_name");
        assert_eq!(json["record"]["kind"], "stall");
        assert_eq!(json["record"]["index"], 3);
    }
}
