pub mod html;
pub mod web;

use async_trait::async_trait;
use thiserror::Error;

pub use html::HtmlPage;
pub use web::{BrowserOptions, WebDriverPage};

/// Errors reported by a page driver
#[derive(Debug, Error)]
pub enum DriverError {
    /// No element matches the selector
    #[error("no element matches {selector}")]
    ElementNotFound { selector: String },

    /// Selector could not be parsed
    #[error("invalid selector {selector}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Could not start or reach the WebDriver server
    #[error("failed to connect to WebDriver: {0}")]
    Connect(String),

    /// A browser command failed
    #[error("browser command failed: {0}")]
    Command(String),
}

impl DriverError {
    pub fn not_found(selector: &str) -> Self {
        DriverError::ElementNotFound {
            selector: selector.to_string(),
        }
    }

    /// Whether the error only means the element is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, DriverError::ElementNotFound { .. })
    }
}

/// Browser primitives the scraper depends on.
///
/// Elements are addressed by CSS selector; every lookup targets the first match.
#[async_trait]
pub trait PageDriver: Send {
    /// Navigate to a URL
    async fn goto(&mut self, url: &str) -> Result<(), DriverError>;

    /// Visible text of the element, lines separated by `\n`
    async fn text(&mut self, selector: &str) -> Result<String, DriverError>;

    /// Attribute value of the element, `None` when the attribute is absent
    async fn attr(&mut self, selector: &str, name: &str) -> Result<Option<String>, DriverError>;

    /// Type into the element
    async fn send_keys(&mut self, selector: &str, keys: &str) -> Result<(), DriverError>;

    /// Press Enter in the element
    async fn submit(&mut self, selector: &str) -> Result<(), DriverError>;

    /// Release the page
    async fn close(&mut self) -> Result<(), DriverError>;
}
