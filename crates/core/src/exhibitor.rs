//! Exhibitor record type with its structured and flat output views.
//!
//! This module defines the [`Exhibitor`] struct, the sole entity the engine
//! produces, along with [`FlatExhibitor`], the tabular twin used for CSV
//! output where `categories` collapses into a single `"; "`-joined string.

use serde::Serialize;

/// Column order shared by [`FlatExhibitor`] serialization and CSV output.
pub const FLAT_COLUMNS: [&str; 9] =
    ["name", "profile_url", "booth", "city", "state", "country", "description", "featured", "categories"];

/// One harvested directory listing.
///
/// Optional text fields default to the empty string rather than `None`,
/// matching the output schema downstream consumers expect. `profile_url` is
/// the dedup identity key; records are immutable once accepted by the
/// [`crate::collect::Collector`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Exhibitor {
    /// Company name. Required: extraction rejects cards where this is empty.
    pub name: String,

    /// Absolute URL of the exhibitor's profile page, or empty when the card
    /// carries no resolvable profile link.
    pub profile_url: String,

    /// Booth number, empty when absent.
    pub booth: String,

    /// City part of the free-text location string.
    pub city: String,

    /// State/region part of the free-text location string.
    pub state: String,

    /// Country part of the free-text location string.
    pub country: String,

    /// Short listing description, empty when absent.
    pub description: String,

    /// Presence-based featured flag. No text is read to derive this.
    pub featured: bool,

    /// Category labels in DOM encounter order. Duplicates within one card
    /// are kept; only cross-record dedup (on `profile_url`) applies.
    pub categories: Vec<String>,
}

impl Exhibitor {
    /// Produces the flat view of this record.
    ///
    /// All fields carry over unchanged except `categories`, which joins into
    /// one `"; "`-separated string (empty sequence becomes the empty string).
    pub fn flatten(&self) -> FlatExhibitor {
        FlatExhibitor {
            name: self.name.clone(),
            profile_url: self.profile_url.clone(),
            booth: self.booth.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
            description: self.description.clone(),
            featured: self.featured,
            categories: self.categories.join("; "),
        }
    }
}

/// Tabular view of an [`Exhibitor`] with joined categories.
///
/// Field order matches [`FLAT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatExhibitor {
    pub name: String,
    pub profile_url: String,
    pub booth: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub description: String,
    pub featured: bool,
    pub categories: String,
}

/// Flattens an accepted record sequence into its tabular view.
pub fn flat_view(records: &[Exhibitor]) -> Vec<FlatExhibitor> {
    records.iter().map(Exhibitor::flatten).collect()
}
