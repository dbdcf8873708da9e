use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::sites::Site;

/// Vocabulary used to clean the raw text of one result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Lines removed when they match exactly (promotional badges)
    #[serde(default)]
    pub denylist: Vec<String>,

    /// Line after which everything belongs to other offers
    #[serde(default)]
    pub more_offers_marker: Option<String>,

    /// Regex a line must match to be taken as a price
    #[serde(default = "default_price_pattern")]
    pub price_pattern: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            denylist: Vec::new(),
            more_offers_marker: None,
            price_pattern: default_price_pattern(),
        }
    }
}

/// Per-site constants for locating the search box and the result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Name shown in reports
    pub name: String,

    /// Page holding the search field
    pub home_url: String,

    /// CSS selector of the search input
    pub search_field: String,

    /// CSS selector template for a result; `{}` is replaced by the position
    pub result_selector: String,

    /// CSS selector template for the result's primary link
    pub link_selector: String,

    /// First position worth inspecting
    #[serde(default)]
    pub first_position: usize,

    #[serde(default)]
    pub cleaner: CleanerConfig,
}

/// SMTP relay settings. Credentials always come from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
        }
    }
}

impl MailConfig {
    /// Apply `SMTP_HOST` / `SMTP_PORT` overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `SMTP_HOST` / `SMTP_PORT` overrides read through `get`
    pub fn with_overrides(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = get("SMTP_HOST").filter(|h| !h.is_empty()) {
            self.host = host;
        }
        if let Some(port) = get("SMTP_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => ::log::warn!("Ignoring invalid SMTP_PORT value: {}", port),
            }
        }
        self
    }
}

/// Site overrides; a missing entry falls back to the built-in preset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitesConfig {
    #[serde(default)]
    pub amazon: Option<SiteConfig>,

    #[serde(default)]
    pub ebay: Option<SiteConfig>,
}

/// Top level configuration for a query run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Maximum listings kept per site
    #[serde(default = "default_results_limit")]
    pub results_limit: usize,

    /// Maximum candidate positions inspected per site
    #[serde(default = "default_max_scan_depth")]
    pub max_scan_depth: usize,

    /// WebDriver server to connect to instead of spawning chromedriver
    #[serde(default)]
    pub webdriver_url: Option<String>,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    #[serde(default)]
    pub smtp: MailConfig,

    #[serde(default)]
    pub sites: SitesConfig,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            results_limit: default_results_limit(),
            max_scan_depth: default_max_scan_depth(),
            webdriver_url: None,
            headless: default_headless(),
            smtp: MailConfig::default(),
            sites: SitesConfig::default(),
        }
    }
}

impl ScoutConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Site constants, honouring overrides from the config file
    pub fn site(&self, site: Site) -> SiteConfig {
        let custom = match site {
            Site::Amazon => &self.sites.amazon,
            Site::Ebay => &self.sites.ebay,
        };
        custom.clone().unwrap_or_else(|| site.preset())
    }
}

/// Default value for results_limit
fn default_results_limit() -> usize {
    5
}

/// Default value for max_scan_depth
fn default_max_scan_depth() -> usize {
    50
}

fn default_headless() -> bool {
    true
}

fn default_price_pattern() -> String {
    r"^\$".to_string()
}

fn default_smtp_host() -> String {
    "smtp-mail.outlook.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}
