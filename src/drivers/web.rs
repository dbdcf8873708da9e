use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::{Child, Command};

use super::{DriverError, PageDriver};
use crate::config::ScoutConfig;
use crate::error::{Result, ScoutError};

/// WebDriver key code for Enter
const ENTER_KEY: &str = "\u{e007}";

/// Attempts made while a freshly spawned chromedriver starts listening
const CONNECT_ATTEMPTS: u32 = 20;

/// How to obtain a browser session
#[derive(Debug, Clone, Default)]
pub struct BrowserOptions {
    /// chromedriver binary to spawn
    pub driver_path: Option<PathBuf>,

    /// Already running WebDriver server
    pub webdriver_url: Option<String>,

    /// Browser binary handed to chromedriver
    pub browser_path: Option<String>,

    pub headless: bool,
}

impl BrowserOptions {
    /// Read `CHROMEDRIVERPATH`, `WEBDRIVER_URL` and `SELENIUM_BROWSER_PATH`.
    ///
    /// The environment takes precedence over the config file.
    pub fn from_env(config: &ScoutConfig) -> Self {
        Self::from_lookup(config, |name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `get`. Empty values count as unset.
    pub fn from_lookup(config: &ScoutConfig, get: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| get(name).filter(|v| !v.is_empty());

        Self {
            driver_path: var("CHROMEDRIVERPATH").map(PathBuf::from),
            webdriver_url: var("WEBDRIVER_URL").or_else(|| config.webdriver_url.clone()),
            browser_path: var("SELENIUM_BROWSER_PATH"),
            headless: config.headless,
        }
    }

    /// Fail early when there is no way to reach a browser
    pub fn validate(&self) -> Result<()> {
        if self.driver_path.is_none() && self.webdriver_url.is_none() {
            return Err(ScoutError::Config(
                "WebDriver path not set: set CHROMEDRIVERPATH or WEBDRIVER_URL".to_string(),
            ));
        }
        Ok(())
    }

    /// Chrome capabilities for the new session
    pub fn capabilities(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut args = vec!["--log-level=3", "--window-size=1920,1080"];
        if self.headless {
            args.push("--headless");
        }

        let mut chrome_options = serde_json::json!({ "args": args });
        if let Some(binary) = &self.browser_path {
            chrome_options["binary"] = serde_json::Value::String(binary.clone());
        }

        let mut caps = serde_json::Map::new();
        caps.insert("goog:chromeOptions".to_string(), chrome_options);
        caps
    }
}

/// A live browser tab driven over the WebDriver protocol
pub struct WebDriverPage {
    client: Client,
    driver_process: Option<Child>,
}

impl WebDriverPage {
    /// Connect to a WebDriver server, spawning chromedriver if a binary is configured
    pub async fn connect(options: &BrowserOptions) -> Result<Self> {
        options.validate()?;

        if let Some(url) = &options.webdriver_url {
            let client = connect_to_webdriver(url, options, 1).await?;
            return Ok(Self {
                client,
                driver_process: None,
            });
        }

        let Some(driver_path) = &options.driver_path else {
            return Err(ScoutError::Config("WebDriver path not set".to_string()));
        };
        let (child, url) = spawn_chromedriver(driver_path)?;
        let client = connect_to_webdriver(&url, options, CONNECT_ATTEMPTS).await?;

        Ok(Self {
            client,
            driver_process: Some(child),
        })
    }

    async fn find(
        &self,
        selector: &str,
    ) -> std::result::Result<fantoccini::elements::Element, DriverError> {
        self.client
            .find(Locator::Css(selector))
            .await
            .map_err(|e| map_cmd_error(selector, e))
    }
}

/// Start chromedriver on a free local port
fn spawn_chromedriver(driver_path: &Path) -> Result<(Child, String)> {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };

    ::log::info!(
        "Starting chromedriver {} on port {}",
        driver_path.display(),
        port
    );
    let child = Command::new(driver_path)
        .arg(format!("--port={}", port))
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            ScoutError::Config(format!(
                "failed to start chromedriver at {}: {}",
                driver_path.display(),
                e
            ))
        })?;

    Ok((child, format!("http://localhost:{}", port)))
}

async fn connect_to_webdriver(
    webdriver_url: &str,
    options: &BrowserOptions,
    attempts: u32,
) -> Result<Client> {
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        let mut builder = ClientBuilder::native();
        builder.capabilities(options.capabilities());

        match builder.connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                return Ok(client);
            }
            Err(e) => {
                ::log::trace!(
                    "WebDriver at {} not ready (attempt {}): {}",
                    webdriver_url,
                    attempt,
                    e
                );
                last_error = e.to_string();
            }
        }
        if attempt < attempts {
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    }

    ::log::error!(
        "Failed to connect to WebDriver at {}: {}",
        webdriver_url,
        last_error
    );
    Err(DriverError::Connect(format!("{}: {}", webdriver_url, last_error)).into())
}

fn map_cmd_error(selector: &str, error: CmdError) -> DriverError {
    if error.is_no_such_element() {
        DriverError::not_found(selector)
    } else {
        DriverError::Command(error.to_string())
    }
}

#[async_trait]
impl PageDriver for WebDriverPage {
    async fn goto(&mut self, url: &str) -> std::result::Result<(), DriverError> {
        ::log::debug!("Navigating to {}", url);
        self.client
            .goto(url)
            .await
            .map_err(|e| DriverError::Command(format!("navigating to {}: {}", url, e)))
    }

    async fn text(&mut self, selector: &str) -> std::result::Result<String, DriverError> {
        let element = self.find(selector).await?;
        element
            .text()
            .await
            .map_err(|e| map_cmd_error(selector, e))
    }

    async fn attr(
        &mut self,
        selector: &str,
        name: &str,
    ) -> std::result::Result<Option<String>, DriverError> {
        let element = self.find(selector).await?;
        element
            .attr(name)
            .await
            .map_err(|e| map_cmd_error(selector, e))
    }

    async fn send_keys(
        &mut self,
        selector: &str,
        keys: &str,
    ) -> std::result::Result<(), DriverError> {
        let element = self.find(selector).await?;
        element
            .send_keys(keys)
            .await
            .map_err(|e| map_cmd_error(selector, e))
    }

    async fn submit(&mut self, selector: &str) -> std::result::Result<(), DriverError> {
        self.send_keys(selector, ENTER_KEY).await
    }

    async fn close(&mut self) -> std::result::Result<(), DriverError> {
        let closed = self
            .client
            .clone()
            .close()
            .await
            .map_err(|e| DriverError::Command(format!("closing session: {}", e)));

        if let Some(mut child) = self.driver_process.take() {
            if let Err(e) = child.kill().await {
                ::log::warn!("Failed to stop chromedriver: {}", e);
            }
        }
        closed
    }
}
