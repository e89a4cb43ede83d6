//! Per-field selector cascades.
//!
//! Each semantic field of a listing card is located by an ordered list of
//! candidate CSS selectors. Candidates are not tried one at a time: they are
//! joined into a single comma-combined query (see [`combined`]) and the first
//! element the combined query matches, in document order, wins. Candidate
//! list order is therefore a readability device, not a priority guarantee;
//! the only contract is "some matching element exists, or none does."

use serde::{Deserialize, Serialize};

/// Candidate selector lists for every field of a listing card.
///
/// The defaults target exhibitor directories: class-based hits first, loose
/// `[class*=...]` nets after. Site profiles override individual lists while
/// `#[serde(default)]` keeps the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSelectors {
    /// Company name candidates. An empty resolution rejects the whole card.
    pub name: Vec<String>,
    /// Anchor candidates for the profile link; `href` is read off the match.
    pub profile_link: Vec<String>,
    /// Presence-only candidates for the featured flag.
    pub featured: Vec<String>,
    /// Booth number candidates.
    pub booth: Vec<String>,
    /// Free-text location candidates (comma-split downstream).
    pub location: Vec<String>,
    /// Description candidates.
    pub description: Vec<String>,
    /// Category label candidates; all matches are taken, not just the first.
    pub categories: Vec<String>,
}

impl Default for FieldSelectors {
    fn default() -> Self {
        Self {
            name: strings(&[".company-name", "h3", ".title"]),
            profile_link: strings(&["a[href*='exhibitor']"]),
            featured: strings(&[".featured", ".star", "[class*='featured']", "[class*='star']"]),
            booth: strings(&[".booth", "[class*='booth']"]),
            location: strings(&[".location", ".address", "[class*='location']"]),
            description: strings(&[".description", "p"]),
            categories: strings(&[".category", ".tag", "[class*='category']"]),
        }
    }
}

/// Joins candidate selectors into one combined query.
///
/// `[".company-name", "h3"]` becomes `".company-name, h3"`. Running the
/// combined query returns the first match across all candidates in document
/// order, which is weaker than trying candidates in priority order: when two
/// candidates match different elements, whichever element appears first in
/// the card wins.
pub fn combined(candidates: &[String]) -> String {
    candidates.join(", ")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
