//! The page capability the engine is handed.
//!
//! The harvesting engine never talks to a browser, a driver binary, or a
//! parser directly: it drives anything that implements [`DirectoryPage`] and
//! reads fields off anything that implements [`CardHandle`]. Adapters shipped
//! with this crate include [`crate::static_page::StaticPage`] (parsed HTML,
//! scrolling is a no-op) and, behind the `webdriver` feature,
//! [`crate::webdriver::WebDriverPage`] (a live session on a running driver).
//! Tests script their own implementations to make loop behavior
//! deterministic.
//!
//! All selector arguments may be comma-combined candidate lists; see
//! [`crate::selectors::combined`] for the match-order caveat.

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// A navigable view of one scrollable directory page.
///
/// Implementations own whatever handle the rendering collaborator requires
/// and expose only the operations the engine needs: navigation, readiness,
/// a scroll trigger, and card enumeration. The engine calls these strictly
/// sequentially; no implementation needs to tolerate concurrent calls.
#[async_trait]
pub trait DirectoryPage: Send + Sync {
    /// The card handle type this page yields.
    type Card: CardHandle;

    /// Navigates to `url` and waits until the page has settled enough to
    /// query. Static implementations may treat this as a no-op.
    ///
    /// Failures here are fatal to the run.
    async fn open(&self, url: &str) -> Result<()>;

    /// Waits until at least one element matches `selector`, or fails with
    /// [`crate::ExpositorError::MissingCards`] once `timeout` elapses.
    async fn await_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Triggers one load-more action by scrolling the view to its current
    /// bottom. Content growth is observed afterwards via [`Self::count_cards`],
    /// never assumed.
    async fn scroll_to_bottom(&self) -> Result<()>;

    /// Counts currently rendered elements matching `selector`.
    async fn count_cards(&self, selector: &str) -> Result<usize>;

    /// Returns handles for all currently rendered cards matching `selector`.
    async fn cards(&self, selector: &str) -> Result<Vec<Self::Card>>;
}

/// One rendered listing card.
///
/// Queries are scoped to the card's subtree. Errors from these methods are
/// treated as per-card faults by the extractor: the card is skipped and the
/// batch continues.
#[async_trait]
pub trait CardHandle: Send + Sync {
    /// Text of the first element matching `selector`, or `None` when nothing
    /// matches. Whitespace is returned as rendered; callers trim.
    async fn first_text(&self, selector: &str) -> Result<Option<String>>;

    /// Value of `attr` on the first element matching `selector`. `None` when
    /// nothing matches or the element lacks the attribute.
    async fn first_attr(&self, selector: &str, attr: &str) -> Result<Option<String>>;

    /// Whether any element matches `selector`. No text is read.
    async fn exists(&self, selector: &str) -> Result<bool>;

    /// Texts of all elements matching `selector`, in document order.
    async fn all_texts(&self, selector: &str) -> Result<Vec<String>>;
}
