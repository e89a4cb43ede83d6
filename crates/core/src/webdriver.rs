//! Live-browser page adapter over the W3C WebDriver protocol.
//!
//! Script-rendered directories only reveal their cards to a real browser.
//! [`WebDriverPage`] drives one through a WebDriver server (chromedriver,
//! geckodriver) using the handful of endpoints the pipeline needs: navigate,
//! execute a scroll script, find elements, and read element text and
//! attributes. The browser and driver processes are managed outside this
//! crate; this adapter only speaks to an already-running server.
//!
//! # Example
//!
//! ```rust,no_run
//! use expositor_core::webdriver::WebDriverPage;
//! use expositor_core::Harvester;
//!
//! # fn main() {
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! // chromedriver listening on its default port
//! let page = WebDriverPage::connect().await.unwrap();
//! let harvest = Harvester::new().run(&page).await;
//! page.close().await.unwrap();
//! println!("{} exhibitors", harvest.unwrap().records.len());
//! # });
//! # }
//! ```

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::time::sleep;

use crate::Result;
use crate::error::ExpositorError;
use crate::page::{CardHandle, DirectoryPage};

/// Key under which WebDriver responses carry element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Connection settings for a WebDriver server.
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    /// Base URL of the WebDriver server.
    pub server: String,

    /// Page load timeout in seconds, applied to the session after creation.
    pub page_load: u64,

    /// Poll interval while waiting for the first card to appear.
    pub poll: Duration,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            server: "http://localhost:9515".to_string(),
            page_load: 60,
            poll: Duration::from_millis(250),
        }
    }
}

/// A browser tab held open through a WebDriver session.
///
/// Dropping the page leaves the session running; call [`close`] to end it.
///
/// [`close`]: WebDriverPage::close
#[derive(Debug, Clone)]
pub struct WebDriverPage {
    http: reqwest::Client,
    /// `{server}/session/{id}`, the prefix of every session endpoint.
    session: String,
    id: String,
    poll: Duration,
}

impl WebDriverPage {
    /// Opens a session against a server on the default chromedriver port.
    pub async fn connect() -> Result<Self> {
        Self::with_config(WebDriverConfig::default()).await
    }

    /// Opens a session against the configured server.
    pub async fn with_config(config: WebDriverConfig) -> Result<Self> {
        // Generous client timeout: navigation legitimately blocks until the
        // driver's own page load timeout fires.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.page_load + 30))
            .build()?;

        let body = json!({"capabilities": {"alwaysMatch": {}}});
        let value = post_value(&http, &format!("{}/session", config.server), &body).await?;
        let id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| ExpositorError::WebDriver {
                error: "session not created".to_string(),
                message: "response carried no sessionId".to_string(),
            })?
            .to_string();

        let page = Self {
            http,
            session: format!("{}/session/{}", config.server, id),
            id,
            poll: config.poll,
        };
        page.post("timeouts", json!({"pageLoad": config.page_load * 1000})).await?;
        Ok(page)
    }

    /// The driver-assigned session id.
    pub fn session_id(&self) -> &str {
        &self.id
    }

    /// Ends the session, closing the browser window it owns.
    pub async fn close(&self) -> Result<()> {
        delete_value(&self.http, &self.session).await?;
        Ok(())
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        post_value(&self.http, &format!("{}/{path}", self.session), &body).await
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<String>> {
        let value = self
            .post("elements", json!({"using": "css selector", "value": selector}))
            .await?;
        Ok(element_ids(&value))
    }
}

#[async_trait]
impl DirectoryPage for WebDriverPage {
    type Card = WebDriverCard;

    async fn open(&self, url: &str) -> Result<()> {
        self.post("url", json!({"url": url})).await.map_err(|e| match e {
            ExpositorError::WebDriver { error, message } => ExpositorError::PageLoad {
                url: url.to_string(),
                message: format!("{error}: {message}"),
            },
            other => other,
        })?;
        Ok(())
    }

    async fn await_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.count_cards(selector).await? > 0 {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ExpositorError::MissingCards {
                    selector: selector.to_string(),
                    waited_secs: timeout.as_secs(),
                });
            }
            sleep(self.poll).await;
        }
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.post(
            "execute/sync",
            json!({"script": "window.scrollTo(0, document.body.scrollHeight);", "args": []}),
        )
        .await?;
        Ok(())
    }

    async fn count_cards(&self, selector: &str) -> Result<usize> {
        Ok(self.find_all(selector).await?.len())
    }

    async fn cards(&self, selector: &str) -> Result<Vec<WebDriverCard>> {
        Ok(self
            .find_all(selector)
            .await?
            .into_iter()
            .map(|element| WebDriverCard {
                http: self.http.clone(),
                session: self.session.clone(),
                element,
            })
            .collect())
    }
}

/// One card element inside a live [`WebDriverPage`].
///
/// Holds an element reference, so it goes stale if the page re-renders the
/// card; stale reads surface as per-card faults, not run failures.
#[derive(Debug, Clone)]
pub struct WebDriverCard {
    http: reqwest::Client,
    session: String,
    element: String,
}

impl WebDriverCard {
    /// Descendants of this card matching `selector`.
    async fn find(&self, selector: &str) -> Result<Vec<String>> {
        let url = format!("{}/element/{}/elements", self.session, self.element);
        let body = json!({"using": "css selector", "value": selector});
        Ok(element_ids(&post_value(&self.http, &url, &body).await?))
    }

    async fn text_of(&self, element: &str) -> Result<Option<String>> {
        let url = format!("{}/element/{element}/text", self.session);
        Ok(get_value(&self.http, &url).await?.as_str().map(str::to_string))
    }
}

#[async_trait]
impl CardHandle for WebDriverCard {
    async fn first_text(&self, selector: &str) -> Result<Option<String>> {
        match self.find(selector).await?.first() {
            Some(element) => self.text_of(element).await,
            None => Ok(None),
        }
    }

    async fn first_attr(&self, selector: &str, attr: &str) -> Result<Option<String>> {
        match self.find(selector).await?.first() {
            Some(element) => {
                let url = format!("{}/element/{element}/attribute/{attr}", self.session);
                Ok(get_value(&self.http, &url).await?.as_str().map(str::to_string))
            }
            None => Ok(None),
        }
    }

    async fn exists(&self, selector: &str) -> Result<bool> {
        Ok(!self.find(selector).await?.is_empty())
    }

    async fn all_texts(&self, selector: &str) -> Result<Vec<String>> {
        let mut texts = Vec::new();
        for element in self.find(selector).await? {
            if let Some(text) = self.text_of(&element).await? {
                texts.push(text);
            }
        }
        Ok(texts)
    }
}

async fn post_value(http: &reqwest::Client, url: &str, body: &Value) -> Result<Value> {
    let response = http
        .post(url)
        .header("Content-Type", "application/json; charset=utf-8")
        .body(body.to_string())
        .send()
        .await?;
    finish(response).await
}

async fn get_value(http: &reqwest::Client, url: &str) -> Result<Value> {
    finish(http.get(url).send().await?).await
}

async fn delete_value(http: &reqwest::Client, url: &str) -> Result<Value> {
    finish(http.delete(url).send().await?).await
}

async fn finish(response: reqwest::Response) -> Result<Value> {
    let ok = response.status().is_success();
    let body = response.text().await?;
    decode_response(ok, &body)
}

/// Unwraps the `value` envelope of a WebDriver response, turning non-success
/// responses into [`ExpositorError::WebDriver`] built from the standard
/// `error`/`message` fields.
fn decode_response(ok: bool, body: &str) -> Result<Value> {
    let mut parsed: Value = serde_json::from_str(body).map_err(|e| ExpositorError::WebDriver {
        error: "invalid response".to_string(),
        message: e.to_string(),
    })?;
    let value = parsed.get_mut("value").map(Value::take).unwrap_or(Value::Null);

    if ok {
        Ok(value)
    } else {
        let error = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        let message = value.get("message").and_then(Value::as_str).unwrap_or_default().to_string();
        Err(ExpositorError::WebDriver { error, message })
    }
}

fn element_ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get(ELEMENT_KEY).and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = WebDriverConfig::default();
        assert_eq!(config.server, "http://localhost:9515");
        assert_eq!(config.page_load, 60);
        assert_eq!(config.poll, Duration::from_millis(250));
    }

    #[test]
    fn test_decode_success_unwraps_value() {
        let value = decode_response(true, r#"{"value": {"sessionId": "abc123"}}"#).unwrap();
        assert_eq!(value["sessionId"], "abc123");
    }

    #[test]
    fn test_decode_null_value() {
        let value = decode_response(true, r#"{"value": null}"#).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_decode_error_response() {
        let body = r#"{"value": {"error": "no such element", "message": "missing .card"}}"#;
        let err = decode_response(false, body).unwrap_err();
        match err {
            ExpositorError::WebDriver { error, message } => {
                assert_eq!(error, "no such element");
                assert_eq!(message, "missing .card");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode_response(true, "<html>gateway timeout</html>").unwrap_err();
        assert!(matches!(err, ExpositorError::WebDriver { .. }));
    }

    #[test]
    fn test_element_ids_extracts_references() {
        let value = json!([
            {ELEMENT_KEY: "e1"},
            {ELEMENT_KEY: "e2"},
            {"unrelated": true},
        ]);
        assert_eq!(element_ids(&value), vec!["e1", "e2"]);
    }

    #[test]
    fn test_element_ids_of_non_array() {
        assert!(element_ids(&Value::Null).is_empty());
        assert!(element_ids(&json!({"value": 3})).is_empty());
    }
}
