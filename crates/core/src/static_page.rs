//! In-memory page adapter over a fixed HTML document.
//!
//! [`StaticPage`] runs the full harvesting pipeline against HTML that is
//! already in hand (a saved page, a fixture, stdin). Scrolling is a no-op and
//! waiting is pointless, so the convergence loop observes a constant card
//! count and converges after the stall threshold. Card queries match the
//! live-browser adapter's semantics: descendants only, never the card element
//! itself.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::Result;
use crate::error::ExpositorError;
use crate::page::{CardHandle, DirectoryPage};

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ExpositorError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// A directory page backed by a fixed HTML string.
#[derive(Debug, Clone)]
pub struct StaticPage {
    html: String,
}

impl StaticPage {
    pub fn new(html: String) -> Self {
        Self { html }
    }
}

#[async_trait]
impl DirectoryPage for StaticPage {
    type Card = StaticCard;

    /// No navigation happens; the document was supplied up front.
    async fn open(&self, _url: &str) -> Result<()> {
        Ok(())
    }

    /// Succeeds or fails immediately: a static document cannot change, so
    /// waiting out the timeout would only delay the same answer.
    async fn await_selector(&self, selector: &str, _timeout: Duration) -> Result<()> {
        if self.count_cards(selector).await? > 0 {
            Ok(())
        } else {
            Err(ExpositorError::MissingCards { selector: selector.to_string(), waited_secs: 0 })
        }
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        Ok(())
    }

    async fn count_cards(&self, selector: &str) -> Result<usize> {
        let parsed = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);
        Ok(document.select(&parsed).count())
    }

    async fn cards(&self, selector: &str) -> Result<Vec<StaticCard>> {
        let parsed = parse_selector(selector)?;
        let document = Html::parse_document(&self.html);
        Ok(document.select(&parsed).map(|element| StaticCard::new(element.html())).collect())
    }
}

/// One card detached from a [`StaticPage`], held as its outer HTML.
///
/// Queries re-parse the fragment per call. That keeps the handle free of
/// borrowed DOM state, which the page trait requires, and card fragments are
/// small enough that the parse cost is irrelevant next to scroll pauses.
#[derive(Debug, Clone)]
pub struct StaticCard {
    html: String,
}

impl StaticCard {
    pub fn new(html: String) -> Self {
        Self { html }
    }

    /// The card element inside the re-parsed fragment, skipping any stray
    /// text nodes the fragment parser keeps around it.
    fn with_root<T>(&self, f: impl FnOnce(Option<ElementRef<'_>>) -> T) -> T {
        let fragment = Html::parse_fragment(&self.html);
        let root = fragment.root_element().children().find_map(ElementRef::wrap);
        f(root)
    }
}

#[async_trait]
impl CardHandle for StaticCard {
    async fn first_text(&self, selector: &str) -> Result<Option<String>> {
        let parsed = parse_selector(selector)?;
        Ok(self.with_root(|root| {
            root.and_then(|root| root.select(&parsed).next()).map(|el| el.text().collect::<String>())
        }))
    }

    async fn first_attr(&self, selector: &str, attr: &str) -> Result<Option<String>> {
        let parsed = parse_selector(selector)?;
        Ok(self.with_root(|root| {
            root.and_then(|root| root.select(&parsed).next())
                .and_then(|el| el.value().attr(attr).map(str::to_string))
        }))
    }

    async fn exists(&self, selector: &str) -> Result<bool> {
        let parsed = parse_selector(selector)?;
        Ok(self.with_root(|root| root.is_some_and(|root| root.select(&parsed).next().is_some())))
    }

    async fn all_texts(&self, selector: &str) -> Result<Vec<String>> {
        let parsed = parse_selector(selector)?;
        Ok(self.with_root(|root| match root {
            Some(root) => root.select(&parsed).map(|el| el.text().collect::<String>()).collect(),
            None => Vec::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <div class="directory-item">
                <h3 class="company-name">Acme Machining</h3>
                <a href="/exhibitor/1001">View</a>
            </div>
            <div class="directory-item">
                <h3 class="company-name">Borealis Automation</h3>
            </div>
        </body></html>
    "#;

    #[tokio::test]
    async fn test_counts_cards() {
        let page = StaticPage::new(PAGE.to_string());
        assert_eq!(page.count_cards(".directory-item").await.unwrap(), 2);
        assert_eq!(page.count_cards(".absent").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_await_selector_present() {
        let page = StaticPage::new(PAGE.to_string());
        page.await_selector(".directory-item", Duration::from_secs(30)).await.unwrap();
    }

    #[tokio::test]
    async fn test_await_selector_absent_fails_immediately() {
        let page = StaticPage::new("<html><body></body></html>".to_string());
        let err = page.await_selector(".directory-item", Duration::from_secs(30)).await.unwrap_err();
        assert!(matches!(err, ExpositorError::MissingCards { .. }));
    }

    #[tokio::test]
    async fn test_invalid_selector_is_reported() {
        let page = StaticPage::new(PAGE.to_string());
        let err = page.count_cards("[[").await.unwrap_err();
        assert!(matches!(err, ExpositorError::Selector { .. }));
    }

    #[tokio::test]
    async fn test_cards_detach_in_document_order() {
        let page = StaticPage::new(PAGE.to_string());
        let cards = page.cards(".directory-item").await.unwrap();
        assert_eq!(cards.len(), 2);

        let name = cards[0].first_text(".company-name").await.unwrap();
        assert_eq!(name.as_deref(), Some("Acme Machining"));
        let name = cards[1].first_text(".company-name").await.unwrap();
        assert_eq!(name.as_deref(), Some("Borealis Automation"));
    }

    #[tokio::test]
    async fn test_first_attr_requires_match_then_attr() {
        let card = StaticCard::new(r#"<div><a class="plain">no href</a></div>"#.to_string());
        assert_eq!(card.first_attr("a", "href").await.unwrap(), None);

        let card = StaticCard::new(r#"<div><a href="/x">go</a></div>"#.to_string());
        assert_eq!(card.first_attr("a", "href").await.unwrap().as_deref(), Some("/x"));
    }

    #[tokio::test]
    async fn test_card_queries_exclude_card_root() {
        // Marker class on the card element itself, not on any descendant.
        let card = StaticCard::new(r#"<div class="featured"><h3>X</h3></div>"#.to_string());
        assert!(!card.exists(".featured").await.unwrap());
    }

    #[tokio::test]
    async fn test_all_texts_returns_every_match() {
        let card = StaticCard::new(
            r#"<div><span class="tag">A</span><b>skip</b><span class="tag">B</span></div>"#.to_string(),
        );
        assert_eq!(card.all_texts(".tag").await.unwrap(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_text_concatenates_nested_nodes() {
        let card = StaticCard::new(r#"<div><h3>Acme <em>Machining</em></h3></div>"#.to_string());
        assert_eq!(card.first_text("h3").await.unwrap().as_deref(), Some("Acme Machining"));
    }
}
