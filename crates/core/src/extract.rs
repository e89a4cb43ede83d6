//! Per-card field extraction.
//!
//! Turns one card element into an [`Exhibitor`] by walking the selector
//! cascades in [`FieldSelectors`]. A card with no usable name is skipped, and
//! a card whose DOM queries fail mid-read is skipped with the fault recorded;
//! neither aborts the batch. Only the harvest layer decides what skips mean
//! in aggregate.

use crate::exhibitor::Exhibitor;
use crate::page::CardHandle;
use crate::selectors::{FieldSelectors, combined};
use crate::Result;

/// What became of a single card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    /// The card yielded a record.
    Extracted(Exhibitor),

    /// The card yielded nothing; the reason says why.
    Skipped(SkipReason),
}

/// Why a card produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Every name candidate came back absent or whitespace-only.
    MissingName,

    /// A DOM query against the card failed; the message is the underlying
    /// error rendered for reporting.
    Fault(String),
}

/// Extracts one card, never failing the batch.
///
/// `origin` is prepended to relative profile hrefs; pass an empty string to
/// leave them as-is.
pub async fn extract_card<C: CardHandle>(
    card: &C, selectors: &FieldSelectors, origin: &str,
) -> CardOutcome {
    match read_fields(card, selectors, origin).await {
        Ok(Some(record)) => CardOutcome::Extracted(record),
        Ok(None) => CardOutcome::Skipped(SkipReason::MissingName),
        Err(e) => CardOutcome::Skipped(SkipReason::Fault(e.to_string())),
    }
}

/// Reads every field off the card. `Ok(None)` means the name cascade found
/// nothing non-blank.
async fn read_fields<C: CardHandle>(
    card: &C, selectors: &FieldSelectors, origin: &str,
) -> Result<Option<Exhibitor>> {
    let name = match first_trimmed(card, &selectors.name).await? {
        Some(name) => name,
        None => return Ok(None),
    };

    let href = card
        .first_attr(&combined(&selectors.profile_link), "href")
        .await?
        .unwrap_or_default();
    let profile_url = absolutize(&href, origin);

    let featured = card.exists(&combined(&selectors.featured)).await?;
    let booth = first_trimmed(card, &selectors.booth).await?.unwrap_or_default();

    let location = first_trimmed(card, &selectors.location).await?.unwrap_or_default();
    let (city, state, country) = split_location(&location);

    let description = first_trimmed(card, &selectors.description).await?.unwrap_or_default();

    let categories: Vec<String> = card
        .all_texts(&combined(&selectors.categories))
        .await?
        .into_iter()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    Ok(Some(Exhibitor {
        name,
        profile_url,
        booth,
        city,
        state,
        country,
        description,
        featured,
        categories,
    }))
}

/// First match of the cascade, trimmed; `None` when nothing matches or the
/// match renders as whitespace.
async fn first_trimmed<C: CardHandle>(card: &C, candidates: &[String]) -> Result<Option<String>> {
    let text = card.first_text(&combined(candidates)).await?;
    Ok(text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()))
}

/// Splits a free-form location into (city, state, country) on commas.
///
/// Positional and lossy: the first three comma segments are taken as-is and
/// anything past the third is discarded. Missing segments come back empty.
pub fn split_location(location: &str) -> (String, String, String) {
    let mut parts = location.split(',').map(|part| part.trim().to_string());
    let city = parts.next().unwrap_or_default();
    let state = parts.next().unwrap_or_default();
    let country = parts.next().unwrap_or_default();
    (city, state, country)
}

/// Prefixes `origin` onto relative hrefs. Absolute hrefs pass through and an
/// empty href stays empty rather than becoming the bare origin.
pub(crate) fn absolutize(href: &str, origin: &str) -> String {
    if href.is_empty() {
        String::new()
    } else if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{origin}{href}")
    }
}
