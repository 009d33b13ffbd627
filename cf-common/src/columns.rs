//! Chromatography column names and vendor reference links
//!
//! Column display names are the exact strings shown to users and returned on
//! the JSON API. Known names map to a fixed vendor product page; anything else
//! falls back to a vendor search link.

use reqwest::Url;
use serde::Serialize;

pub const HISTRAP_FF: &str = "HisTrap FF (IMAC, Ni-NTA)";
pub const GSTRAP_4B: &str = "GSTrap 4B (Affinity)";
pub const STREP_TACTIN: &str = "Strep-Tactin Sepharose (Affinity)";
pub const HITRAP_Q_HP: &str = "HiTrap Q HP (Anion exchange)";
pub const HITRAP_SP_HP: &str = "HiTrap SP HP (Cation exchange)";
pub const SUPERDEX_75_SEC: &str = "Superdex 75 Increase (SEC)";
pub const SUPERDEX_200_SEC: &str = "Superdex 200 Increase (SEC)";
pub const SUPERDEX_75_POLISHING: &str = "Superdex 75 Increase (SEC polishing)";
pub const SUPERDEX_200_POLISHING: &str = "Superdex 200 Increase (SEC polishing)";

const PRODUCT_BASE: &str = "https://www.cytivalifesciences.com/en/de/products/items";
const VENDOR_SEARCH_URL: &str = "https://www.cytivalifesciences.com/en/de/search";

/// Hand-curated display name → product page slug
const PRODUCT_PAGES: &[(&str, &str)] = &[
    (HITRAP_Q_HP, "hitrap-q-hp-anion-exchange-chromatography-column-p-00607"),
    (HITRAP_SP_HP, "hitrap-sp-hp-cation-exchange-chromatography-column-p-00794"),
    (HISTRAP_FF, "histrap-ff-p-00251"),
    (GSTRAP_4B, "gstrap-4b-columns-p-00307"),
    (STREP_TACTIN, "strep-tactin-xt-4flow-p-08318"),
    (SUPERDEX_75_SEC, "superdex-75-increase-p-06188"),
    (
        SUPERDEX_200_SEC,
        "superdex-200-increase-small-scale-size-exclusion-chromatography-columns-p-06190",
    ),
    (SUPERDEX_75_POLISHING, "superdex-75-increase-p-06188"),
    (
        SUPERDEX_200_POLISHING,
        "superdex-200-increase-small-scale-size-exclusion-chromatography-columns-p-06190",
    ),
];

/// A column name together with its vendor link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReference {
    pub display_name: String,
    pub url: String,
}

impl ColumnReference {
    pub fn resolve(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            url: resolve_url(display_name),
        }
    }
}

/// Vendor link for a column display name.
///
/// Empty names yield an empty string without a lookup. Names outside the
/// curated table get a search link with the name form-encoded into `q`.
pub fn resolve_url(display_name: &str) -> String {
    if display_name.is_empty() {
        return String::new();
    }

    if let Some(slug) = product_slug(display_name) {
        return format!("{}/{}", PRODUCT_BASE, slug);
    }

    match Url::parse_with_params(VENDOR_SEARCH_URL, &[("q", display_name)]) {
        Ok(url) => url.into(),
        // VENDOR_SEARCH_URL is a valid absolute URL
        Err(_) => String::new(),
    }
}

fn product_slug(display_name: &str) -> Option<&'static str> {
    PRODUCT_PAGES
        .iter()
        .find(|(name, _)| *name == display_name)
        .map(|(_, slug)| *slug)
}
