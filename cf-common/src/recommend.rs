//! Purification column recommendation
//!
//! A capture column is chosen from the affinity tag when one is known,
//! otherwise from the isoelectric point. A size-exclusion polishing column is
//! chosen from the molecular weight. Both steps fall back to a prior value
//! when their input is missing, so the same function serves the stored
//! read-time recommendation and per-request tag overrides.

use serde::Serialize;

use crate::columns::{
    ColumnReference, GSTRAP_4B, HISTRAP_FF, HITRAP_Q_HP, HITRAP_SP_HP, STREP_TACTIN,
    SUPERDEX_200_POLISHING, SUPERDEX_200_SEC, SUPERDEX_75_POLISHING,
};

/// Neutral pI; exact ties go to size exclusion instead of ion exchange
pub const NEUTRAL_PI: f64 = 7.0;

/// Upper bound (inclusive) for the Superdex 75 polishing range, in kDa
pub const SUPERDEX_75_MAX_KDA: f64 = 70.0;

/// Affinity tags with a dedicated capture column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AffinityTag {
    His,
    #[serde(rename = "GST")]
    Gst,
    Strep,
}

impl AffinityTag {
    pub const ALL: [AffinityTag; 3] = [AffinityTag::His, AffinityTag::Gst, AffinityTag::Strep];

    /// Literal, case-sensitive match after trimming whitespace.
    ///
    /// Returns `None` for anything else, including the stored "none" label.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "His" => Some(AffinityTag::His),
            "GST" => Some(AffinityTag::Gst),
            "Strep" => Some(AffinityTag::Strep),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AffinityTag::His => "His",
            AffinityTag::Gst => "GST",
            AffinityTag::Strep => "Strep",
        }
    }

    pub fn capture_column(self) -> &'static str {
        match self {
            AffinityTag::His => HISTRAP_FF,
            AffinityTag::Gst => GSTRAP_4B,
            AffinityTag::Strep => STREP_TACTIN,
        }
    }
}

/// Inputs to the heuristic
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecommendationInput {
    pub tag: Option<AffinityTag>,
    pub isoelectric_point: Option<f64>,
    pub molecular_weight_kda: Option<f64>,
}

impl RecommendationInput {
    /// Build from a free-text tag and numeric properties.
    ///
    /// Non-finite numbers are treated as absent.
    pub fn new(
        tag: Option<&str>,
        isoelectric_point: Option<f64>,
        molecular_weight_kda: Option<f64>,
    ) -> Self {
        Self {
            tag: tag.and_then(AffinityTag::parse),
            isoelectric_point: isoelectric_point.filter(|v| v.is_finite()),
            molecular_weight_kda: molecular_weight_kda.filter(|v| v.is_finite()),
        }
    }
}

/// Parse a numeric property stored as text: surrounding whitespace is
/// ignored and anything that is not a finite number yields `None`.
pub fn parse_measure(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Primary and polishing column choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recommendation {
    pub primary_column: Option<&'static str>,
    pub polishing_column: Option<&'static str>,
}

impl Recommendation {
    /// Prior used when reading stored proteins: size exclusion as primary,
    /// no polishing step.
    pub const BASELINE: Recommendation = Recommendation {
        primary_column: Some(SUPERDEX_200_SEC),
        polishing_column: None,
    };

    pub fn primary(&self) -> Option<ColumnReference> {
        self.primary_column.map(ColumnReference::resolve)
    }

    pub fn polishing(&self) -> Option<ColumnReference> {
        self.polishing_column.map(ColumnReference::resolve)
    }

    /// Flattened form used on the JSON API and in templates
    pub fn fields(&self) -> RecommendationFields {
        let (recommended_column, recommended_url) = split_reference(self.primary());
        let (polishing_column, polishing_url) = split_reference(self.polishing());
        RecommendationFields {
            recommended_column,
            recommended_url,
            polishing_column,
            polishing_url,
        }
    }
}

fn split_reference(reference: Option<ColumnReference>) -> (Option<String>, String) {
    match reference {
        Some(ColumnReference { display_name, url }) => (Some(display_name), url),
        None => (None, String::new()),
    }
}

/// Recommendation with resolved links; URLs are empty when a column is absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationFields {
    pub recommended_column: Option<String>,
    pub recommended_url: String,
    pub polishing_column: Option<String>,
    pub polishing_url: String,
}

/// Apply the heuristic on top of `prior`.
///
/// Steps whose input is missing leave the corresponding prior value in place.
pub fn recommend(input: &RecommendationInput, prior: Recommendation) -> Recommendation {
    Recommendation {
        primary_column: primary_column(input).or(prior.primary_column),
        polishing_column: polishing_column(input.molecular_weight_kda).or(prior.polishing_column),
    }
}

/// Read-time recommendation for a stored protein
pub fn recommend_stored(input: &RecommendationInput) -> Recommendation {
    recommend(input, Recommendation::BASELINE)
}

/// Re-run the heuristic with a user supplied tag. A blank override keeps the
/// stored recommendation.
pub fn apply_tag_override(
    stored: Recommendation,
    input: &RecommendationInput,
    tag_override: Option<&str>,
) -> Recommendation {
    match tag_override.map(str::trim).filter(|t| !t.is_empty()) {
        Some(tag) => {
            let overridden = RecommendationInput {
                tag: AffinityTag::parse(tag),
                ..*input
            };
            recommend(&overridden, stored)
        }
        None => stored,
    }
}

fn primary_column(input: &RecommendationInput) -> Option<&'static str> {
    if let Some(tag) = input.tag {
        return Some(tag.capture_column());
    }

    let pi = input.isoelectric_point?;
    if pi < NEUTRAL_PI {
        Some(HITRAP_Q_HP)
    } else if pi > NEUTRAL_PI {
        Some(HITRAP_SP_HP)
    } else {
        Some(SUPERDEX_200_SEC)
    }
}

fn polishing_column(mw_kda: Option<f64>) -> Option<&'static str> {
    let mw = mw_kda?;
    if mw <= SUPERDEX_75_MAX_KDA {
        Some(SUPERDEX_75_POLISHING)
    } else {
        Some(SUPERDEX_200_POLISHING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn untagged(pi: Option<f64>, mw: Option<f64>) -> RecommendationInput {
        RecommendationInput::new(None, pi, mw)
    }

    fn primary_for(input: RecommendationInput) -> Option<&'static str> {
        recommend(&input, Recommendation::default()).primary_column
    }

    #[test]
    fn test_his_tag_wins_regardless_of_pi() {
        for pi in [None, Some(3.0), Some(7.0), Some(11.5)] {
            let input = RecommendationInput::new(Some("His"), pi, Some(30.0));
            assert_eq!(primary_for(input), Some(HISTRAP_FF));
        }
    }

    #[test]
    fn test_gst_and_strep_tags() {
        let gst = RecommendationInput::new(Some("GST"), Some(5.0), None);
        let strep = RecommendationInput::new(Some("Strep"), Some(9.0), None);
        assert_eq!(primary_for(gst), Some(GSTRAP_4B));
        assert_eq!(primary_for(strep), Some(STREP_TACTIN));
    }

    #[test]
    fn test_tag_matching_is_literal() {
        assert_eq!(AffinityTag::parse("His"), Some(AffinityTag::His));
        assert_eq!(AffinityTag::parse("  GST "), Some(AffinityTag::Gst));
        assert_eq!(AffinityTag::parse("his"), None);
        assert_eq!(AffinityTag::parse("His6"), None);
        assert_eq!(AffinityTag::parse("none"), None);

        // Unknown tag falls through to the pI rule
        let input = RecommendationInput::new(Some("his"), Some(5.0), None);
        assert_eq!(primary_for(input), Some(HITRAP_Q_HP));
    }

    #[test]
    fn test_pi_thresholds() {
        assert_eq!(primary_for(untagged(Some(6.9), None)), Some(HITRAP_Q_HP));
        assert_eq!(primary_for(untagged(Some(7.0), None)), Some(SUPERDEX_200_SEC));
        assert_eq!(primary_for(untagged(Some(7.1), None)), Some(HITRAP_SP_HP));
    }

    #[test]
    fn test_mw_thresholds() {
        let at = recommend(&untagged(None, Some(70.0)), Recommendation::default());
        let above = recommend(&untagged(None, Some(70.01)), Recommendation::default());
        assert_eq!(at.polishing_column, Some(SUPERDEX_75_POLISHING));
        assert_eq!(above.polishing_column, Some(SUPERDEX_200_POLISHING));
    }

    #[test]
    fn test_missing_inputs_keep_prior() {
        let prior = Recommendation {
            primary_column: Some(GSTRAP_4B),
            polishing_column: Some(SUPERDEX_200_POLISHING),
        };
        assert_eq!(recommend(&RecommendationInput::default(), prior), prior);
        assert_eq!(
            recommend(&RecommendationInput::default(), Recommendation::default()),
            Recommendation::default()
        );
    }

    #[test]
    fn test_polishing_independent_of_primary() {
        let input = RecommendationInput::new(Some("His"), None, Some(120.0));
        let rec = recommend(&input, Recommendation::default());
        assert_eq!(rec.primary_column, Some(HISTRAP_FF));
        assert_eq!(rec.polishing_column, Some(SUPERDEX_200_POLISHING));
    }

    #[test]
    fn test_end_to_end_example() {
        let rec = recommend_stored(&untagged(Some(5.2), Some(45.0)));
        assert_eq!(rec.primary_column, Some(HITRAP_Q_HP));
        assert_eq!(rec.polishing_column, Some(SUPERDEX_75_POLISHING));
    }

    #[test]
    fn test_stored_baseline_without_properties() {
        let rec = recommend_stored(&RecommendationInput::new(Some("none"), None, None));
        assert_eq!(rec, Recommendation::BASELINE);
        let fields = rec.fields();
        assert_eq!(fields.recommended_column.as_deref(), Some(SUPERDEX_200_SEC));
        assert!(fields.recommended_url.contains("superdex-200-increase"));
        assert_eq!(fields.polishing_column, None);
        assert_eq!(fields.polishing_url, "");
    }

    #[test]
    fn test_malformed_numbers_are_absent() {
        assert_eq!(parse_measure("abc"), None);
        assert_eq!(parse_measure(""), None);
        assert_eq!(parse_measure("NaN"), None);
        assert_eq!(parse_measure("inf"), None);
        assert_eq!(parse_measure(" 6.5 "), Some(6.5));

        let nan = RecommendationInput::new(None, Some(f64::NAN), Some(f64::NAN));
        assert_eq!(recommend_stored(&nan), Recommendation::BASELINE);
    }

    #[test]
    fn test_tag_override() {
        let input = untagged(Some(8.2), Some(45.0));
        let stored = recommend_stored(&input);
        assert_eq!(stored.primary_column, Some(HITRAP_SP_HP));

        let his = apply_tag_override(stored, &input, Some("His"));
        assert_eq!(his.primary_column, Some(HISTRAP_FF));
        assert_eq!(his.polishing_column, Some(SUPERDEX_75_POLISHING));

        assert_eq!(apply_tag_override(stored, &input, Some("  ")), stored);
        assert_eq!(apply_tag_override(stored, &input, None), stored);
        // Unknown override label behaves like no tag
        assert_eq!(apply_tag_override(stored, &input, Some("FLAG")), stored);
    }

    #[test]
    fn test_override_replaces_stored_tag() {
        let input = RecommendationInput::new(Some("GST"), Some(5.0), None);
        let stored = recommend_stored(&input);
        assert_eq!(stored.primary_column, Some(GSTRAP_4B));

        let strep = apply_tag_override(stored, &input, Some("Strep"));
        assert_eq!(strep.primary_column, Some(STREP_TACTIN));

        // A non-matching override drops the stored tag and uses pI
        let other = apply_tag_override(stored, &input, Some("MBP"));
        assert_eq!(other.primary_column, Some(HITRAP_Q_HP));
    }

    #[test]
    fn test_fields_resolve_urls() {
        let rec = recommend_stored(&untagged(Some(9.0), Some(150.0)));
        let fields = rec.fields();
        assert_eq!(fields.recommended_column.as_deref(), Some(HITRAP_SP_HP));
        assert!(fields.recommended_url.ends_with("p-00794"));
        assert_eq!(fields.polishing_column.as_deref(), Some(SUPERDEX_200_POLISHING));
        assert!(fields.polishing_url.ends_with("p-06190"));
        assert_eq!(rec.primary().map(|c| c.url), Some(fields.recommended_url));
    }
}
