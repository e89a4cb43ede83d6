//! End-to-end harvest orchestration.
//!
//! [`Harvester`] drives a [`DirectoryPage`] through the full pipeline: open,
//! wait for cards, settle the count via the convergence loop, extract every
//! rendered card, and dedup into the final record sequence. The outcome is a
//! [`Harvest`] carrying the records plus the run report.
//!
//! # Example
//!
//! ```rust
//! use expositor_core::{HarvestConfig, Harvester, StaticPage};
//!
//! # fn main() {
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let html = r#"<div class="directory-item"><h3>Acme</h3></div>"#.to_string();
//! let config = HarvestConfig::builder()
//!     .scroll_pause(std::time::Duration::ZERO)
//!     .settle(std::time::Duration::ZERO)
//!     .build();
//! let harvest = Harvester::with_config(config).run(&StaticPage::new(html)).await.unwrap();
//! assert_eq!(harvest.records.len(), 1);
//! # });
//! # }
//! ```

use std::time::Duration;

use tokio::time::sleep;

use crate::Result;
use crate::collect::{Acceptance, Collector};
use crate::exhibitor::Exhibitor;
use crate::extract::{CardOutcome, SkipReason, extract_card};
use crate::page::DirectoryPage;
use crate::profile::SiteProfile;
use crate::progress::{NullProgress, Progress};
use crate::scroll::{ScrollConfig, ScrollOutcome, settle_cards};

/// Directory targeted when no URL is given.
pub const DEFAULT_URL: &str = "https://directory.imts.com/8_0/explore/exhibitor-gallery.cfm?featured=false";

/// Everything a harvest run needs to know up front.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Page to open. Adapters over already-loaded content ignore it.
    pub url: String,

    /// Card selector, field cascades, and origin for the target site.
    pub profile: SiteProfile,

    /// Convergence loop tuning.
    pub scroll: ScrollConfig,

    /// How long to wait for the first card before giving up on the page.
    pub ready_timeout: Duration,

    /// Grace period after the first card appears, letting the initial batch
    /// finish rendering before the loop starts probing.
    pub settle: Duration,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            profile: SiteProfile::for_url(DEFAULT_URL),
            scroll: ScrollConfig::default(),
            ready_timeout: Duration::from_secs(30),
            settle: Duration::from_secs(3),
        }
    }
}

impl HarvestConfig {
    /// Creates a new builder for fluent configuration.
    pub fn builder() -> HarvestConfigBuilder {
        HarvestConfigBuilder::new()
    }

    /// Config for `url` with the site profile matched from its host.
    pub fn for_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let profile = SiteProfile::for_url(&url);
        Self { url, profile, ..Self::default() }
    }
}

/// Builder for [`HarvestConfig`].
#[derive(Debug, Clone)]
pub struct HarvestConfigBuilder {
    config: HarvestConfig,
}

impl HarvestConfigBuilder {
    pub fn new() -> Self {
        Self { config: HarvestConfig::default() }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    pub fn profile(mut self, profile: SiteProfile) -> Self {
        self.config.profile = profile;
        self
    }

    pub fn scroll_pause(mut self, pause: Duration) -> Self {
        self.config.scroll.pause = pause;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.scroll.max_attempts = max_attempts;
        self
    }

    pub fn ready_timeout(mut self, timeout: Duration) -> Self {
        self.config.ready_timeout = timeout;
        self
    }

    pub fn settle(mut self, settle: Duration) -> Self {
        self.config.settle = settle;
        self
    }

    pub fn build(self) -> HarvestConfig {
        self.config
    }
}

impl Default for HarvestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts from one harvest run.
///
/// `cards` is the number of card elements extraction visited; the remaining
/// counters partition them into kept records, dropped duplicates, cards with
/// no usable name, and cards whose reads faulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestStats {
    pub rounds: u32,
    pub cards: usize,
    pub accepted: usize,
    pub duplicates: usize,
    pub unnamed: usize,
    pub faults: usize,
}

/// Result of a completed harvest run.
#[derive(Debug, Clone)]
pub struct Harvest {
    /// Deduplicated records in first-seen order.
    pub records: Vec<Exhibitor>,

    /// How the convergence loop terminated. [`ScrollOutcome::Exhausted`] is
    /// worth surfacing to users: the page may hold more than was captured.
    pub outcome: ScrollOutcome,

    /// Run report counters.
    pub stats: HarvestStats,
}

/// The harvesting engine.
pub struct Harvester {
    config: HarvestConfig,
}

impl Harvester {
    /// Creates a harvester with the default configuration.
    pub fn new() -> Self {
        Self { config: HarvestConfig::default() }
    }

    /// Creates a harvester with a custom configuration.
    pub fn with_config(config: HarvestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Runs the pipeline without progress reporting.
    pub async fn run<P: DirectoryPage>(&self, page: &P) -> Result<Harvest> {
        self.run_with_progress(page, &mut NullProgress).await
    }

    /// Runs the pipeline, reporting milestones to `progress`.
    ///
    /// Page-level failures (navigation, no card ever matching, a failing
    /// count probe) return `Err`; per-card problems are tallied in
    /// [`HarvestStats`] and never abort the run.
    pub async fn run_with_progress<P: DirectoryPage>(
        &self, page: &P, progress: &mut dyn Progress,
    ) -> Result<Harvest> {
        let config = &self.config;
        let card_selector = &config.profile.card_selector;

        progress.log("loading directory page");
        page.open(&config.url).await?;
        page.await_selector(card_selector, config.ready_timeout).await?;
        sleep(config.settle).await;

        let summary = settle_cards(page, card_selector, &config.scroll, progress).await?;

        progress.log("extracting card data");
        let origin = config.profile.origin_for(&config.url);
        let cards = page.cards(card_selector).await?;

        let mut stats = HarvestStats { rounds: summary.rounds, cards: cards.len(), ..HarvestStats::default() };
        let mut collector = Collector::new();

        for card in &cards {
            match extract_card(card, &config.profile.selectors, &origin).await {
                CardOutcome::Extracted(record) => match collector.accept(record) {
                    Acceptance::Added => {
                        stats.accepted += 1;
                        if let Some(record) = collector.records().last() {
                            progress.accepted(record);
                        }
                    }
                    Acceptance::Duplicate => stats.duplicates += 1,
                },
                CardOutcome::Skipped(SkipReason::MissingName) => stats.unnamed += 1,
                CardOutcome::Skipped(SkipReason::Fault(message)) => {
                    stats.faults += 1;
                    progress.log(&message);
                }
            }
        }

        progress.finish();
        Ok(Harvest { records: collector.into_records(), outcome: summary.outcome, stats })
    }
}

impl Default for Harvester {
    fn default() -> Self {
        Self::new()
    }
}

/// Harvests `page` with the default configuration.
pub async fn harvest<P: DirectoryPage>(page: &P) -> Result<Harvest> {
    Harvester::new().run(page).await
}

/// Harvests `page` with a custom configuration.
pub async fn harvest_with_config<P: DirectoryPage>(page: &P, config: HarvestConfig) -> Result<Harvest> {
    Harvester::with_config(config).run(page).await
}
