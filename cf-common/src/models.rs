//! Database models

use serde::{Deserialize, Serialize};

use crate::recommend::{self, Recommendation, RecommendationFields, RecommendationInput};

/// Tag label stored for freshly ingested proteins
pub const NO_TAG: &str = "none";

/// Stored protein row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protein {
    pub id: i64,
    pub uniprot_id: Option<String>,
    pub name: String,
    pub gene_name: Option<String>,
    pub organism: Option<String>,
    pub length: Option<i64>,
    pub mw_kda: Option<f64>,
    #[serde(rename = "pI")]
    pub pi: Option<f64>,
    pub tag: Option<String>,
    pub description: Option<String>,
}

impl Protein {
    pub fn recommendation_input(&self) -> RecommendationInput {
        RecommendationInput::new(self.tag.as_deref(), self.pi, self.mw_kda)
    }

    /// Recommendation derived from the stored tag and properties
    pub fn recommendation(&self) -> Recommendation {
        recommend::recommend_stored(&self.recommendation_input())
    }

    /// Stored recommendation, optionally re-evaluated with a request tag
    pub fn recommendation_with_tag(&self, tag_override: Option<&str>) -> Recommendation {
        recommend::apply_tag_override(
            self.recommendation(),
            &self.recommendation_input(),
            tag_override,
        )
    }
}

/// Protein merged with its recommendation, as returned by the JSON API
#[derive(Debug, Clone, Serialize)]
pub struct ProteinWithRecommendation {
    #[serde(flatten)]
    pub protein: Protein,
    #[serde(flatten)]
    pub recommendation: RecommendationFields,
}

impl ProteinWithRecommendation {
    pub fn new(protein: Protein, tag_override: Option<&str>) -> Self {
        let recommendation = protein.recommendation_with_tag(tag_override).fields();
        Self {
            protein,
            recommendation,
        }
    }
}

/// Protein prepared for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewProtein {
    pub uniprot_id: String,
    pub name: String,
    pub gene_name: Option<String>,
    pub organism: Option<String>,
    pub length: Option<i64>,
    pub mw_kda: Option<f64>,
    pub pi: Option<f64>,
    pub tag: String,
    pub description: Option<String>,
}

/// Chromatography column catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromatographyColumn {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub resin: Option<String>,
    pub ph_min: Option<f64>,
    pub ph_max: Option<f64>,
    pub description: Option<String>,
}

/// Protein counts per pI range: < 6, 6..=8, > 8
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PiDistribution {
    pub lt6: i64,
    pub btw6_8: i64,
    pub gt8: i64,
}

impl PiDistribution {
    pub fn total(&self) -> i64 {
        self.lt6 + self.btw6_8 + self.gt8
    }
}

/// Protein counts per MW range in kDa: < 50, 50..=100, > 100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MwDistribution {
    pub lt50: i64,
    pub btw50_100: i64,
    pub gt100: i64,
}

impl MwDistribution {
    pub fn total(&self) -> i64 {
        self.lt50 + self.btw50_100 + self.gt100
    }
}

/// Global pI / MW extremes over all proteins
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PropertyRanges {
    pub pi_min: Option<f64>,
    pub pi_max: Option<f64>,
    pub mw_min: Option<f64>,
    pub mw_max: Option<f64>,
}
