//! The convergence loop that drives progressive content loading.
//!
//! Infinitely-scrolling directories render more cards each time the view
//! hits bottom. [`settle_cards`] keeps triggering that load-more action and
//! probing the rendered-card count until the count stops growing for
//! [`STALL_THRESHOLD`] consecutive probes (converged) or the attempt ceiling
//! is reached (exhausted). Neither terminal state is an error: both hand the
//! currently rendered cards to extraction, but the two are kept
//! distinguishable for observability.

use std::time::Duration;

use tokio::time::sleep;

use crate::Result;
use crate::page::DirectoryPage;
use crate::progress::Progress;

/// Consecutive no-growth probes required to declare the count stable.
///
/// Fixed rather than configurable: three probes spaced by the scroll pause
/// is the stabilization contract the count-based stall detection is tested
/// against.
pub const STALL_THRESHOLD: u32 = 3;

/// Tuning for the convergence loop.
#[derive(Debug, Clone)]
pub struct ScrollConfig {
    /// Wait after each load-trigger before probing the card count.
    pub pause: Duration,

    /// Probe-round ceiling. Reaching it terminates the loop as
    /// [`ScrollOutcome::Exhausted`].
    pub max_attempts: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { pause: Duration::from_secs(2), max_attempts: 100 }
    }
}

/// How the convergence loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// The card count held steady for [`STALL_THRESHOLD`] consecutive probes.
    Converged,

    /// The attempt ceiling was reached while the count was still moving.
    /// Not an error: whatever is rendered gets extracted.
    Exhausted,
}

/// Result of one run of the convergence loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSummary {
    /// Terminal state of the loop.
    pub outcome: ScrollOutcome,

    /// Probe rounds performed (each round is one trigger, wait, count).
    pub rounds: u32,

    /// Highest card count observed.
    pub cards: usize,
}

/// Drives scroll-to-bottom until the rendered-card count stabilizes.
///
/// Each round triggers a scroll, waits `config.pause`, then counts elements
/// matching `card_selector`. Growth resets the stall counter; a zero initial
/// count gets no special treatment and simply stalls like any other
/// non-growing count. Once the summary is returned no further triggers are
/// issued.
///
/// Page-level failures (the scroll evaluation or the count query erroring)
/// propagate as fatal; they are collaborator breakage, not content shape.
pub async fn settle_cards<P: DirectoryPage>(
    page: &P, card_selector: &str, config: &ScrollConfig, progress: &mut dyn Progress,
) -> Result<ScrollSummary> {
    let mut last = 0usize;
    let mut stalled = 0u32;

    for round in 1..=config.max_attempts {
        page.scroll_to_bottom().await?;
        sleep(config.pause).await;

        let count = page.count_cards(card_selector).await?;
        progress.probe(round, count);

        if count > last {
            last = count;
            stalled = 0;
        } else {
            stalled += 1;
            if stalled >= STALL_THRESHOLD {
                progress.log("no new cards loading");
                return Ok(ScrollSummary { outcome: ScrollOutcome::Converged, rounds: round, cards: last });
            }
        }
    }

    progress.log("scroll ceiling reached");
    Ok(ScrollSummary { outcome: ScrollOutcome::Exhausted, rounds: config.max_attempts, cards: last })
}
