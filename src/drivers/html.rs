use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;

use super::{DriverError, PageDriver};

/// Page driver over a saved HTML document.
///
/// Navigation and typing are recorded but do not change the document, so a
/// captured search results page can be replayed without a browser.
///
/// Only the source is stored and each lookup re-parses it: `scraper::Html` is not
/// `Send`, and `PageDriver` futures must be.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    source: String,
    current_url: Option<String>,
    typed: Vec<(String, String)>,
    submitted: Vec<String>,
}

impl HtmlPage {
    /// Create a page from HTML source
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            current_url: None,
            typed: Vec::new(),
            submitted: Vec::new(),
        }
    }

    /// Load a page from a saved HTML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::new(source))
    }

    /// Last URL passed to `goto`
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Keys typed so far, as `(selector, keys)` pairs
    pub fn typed(&self) -> &[(String, String)] {
        &self.typed
    }

    /// Selectors that received Enter
    pub fn submitted(&self) -> &[String] {
        &self.submitted
    }

    fn select_text(&self, selector: &str) -> Result<String, DriverError> {
        let selector_ = parse_selector(selector)?;
        let doc = Html::parse_document(&self.source);
        doc.select(&selector_)
            .next()
            .map(visible_text)
            .ok_or_else(|| DriverError::not_found(selector))
    }

    fn select_attr(&self, selector: &str, name: &str) -> Result<Option<String>, DriverError> {
        let selector_ = parse_selector(selector)?;
        let doc = Html::parse_document(&self.source);
        doc.select(&selector_)
            .next()
            .map(|e| e.value().attr(name).map(|s| s.to_string()))
            .ok_or_else(|| DriverError::not_found(selector))
    }
}

fn parse_selector(selector: &str) -> Result<Selector, DriverError> {
    Selector::parse(selector).map_err(|e| DriverError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Approximates rendered text: one line per non-empty text node
fn visible_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(|t| t.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl PageDriver for HtmlPage {
    async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        ::log::debug!("Replaying saved page in place of {}", url);
        self.current_url = Some(url.to_string());
        Ok(())
    }

    async fn text(&mut self, selector: &str) -> Result<String, DriverError> {
        self.select_text(selector)
    }

    async fn attr(&mut self, selector: &str, name: &str) -> Result<Option<String>, DriverError> {
        self.select_attr(selector, name)
    }

    async fn send_keys(&mut self, selector: &str, keys: &str) -> Result<(), DriverError> {
        self.typed.push((selector.to_string(), keys.to_string()));
        Ok(())
    }

    async fn submit(&mut self, selector: &str) -> Result<(), DriverError> {
        self.submitted.push(selector.to_string());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <input id="search" type="text">
        <div data-index="0">
            <span>Best Seller</span>
            <h2>  Remote Control  </h2>
            <span class="price">$6.99</span>
            <a class="link" href="/dp/1">details</a>
        </div>
        <div data-index="1"><a class="bare">no href</a></div>
    </body></html>"#;

    #[tokio::test]
    async fn test_text_is_split_into_trimmed_lines() {
        let mut page = HtmlPage::new(PAGE);
        let text = page.text(r#"div[data-index="0"]"#).await.unwrap();
        assert_eq!(text, "Best Seller\nRemote Control\n$6.99\ndetails");
    }

    #[tokio::test]
    async fn test_attr_lookup() {
        let mut page = HtmlPage::new(PAGE);
        let href = page
            .attr(r#"div[data-index="0"] a.link"#, "href")
            .await
            .unwrap();
        assert_eq!(href.as_deref(), Some("/dp/1"));

        let missing = page
            .attr(r#"div[data-index="1"] a.bare"#, "href")
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_missing_element_is_not_found() {
        let mut page = HtmlPage::new(PAGE);
        let err = page.text(r#"div[data-index="7"]"#).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_selector() {
        let mut page = HtmlPage::new(PAGE);
        let err = page.text("div[").await.unwrap_err();
        assert!(matches!(err, DriverError::InvalidSelector { .. }));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_input_is_recorded() {
        let mut page = HtmlPage::new(PAGE);
        page.goto("https://www.amazon.com").await.unwrap();
        page.send_keys("#search", "remote").await.unwrap();
        page.submit("#search").await.unwrap();

        assert_eq!(page.current_url(), Some("https://www.amazon.com"));
        assert_eq!(page.typed(), &[("#search".to_string(), "remote".to_string())]);
        assert_eq!(page.submitted(), &["#search".to_string()]);
    }
}
