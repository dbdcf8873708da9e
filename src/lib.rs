pub mod config;
pub mod drivers;
pub mod error;
pub mod extract;
pub mod filter;
pub mod notify;
pub mod report;
pub mod results;
pub mod sites;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScoutConfig;
pub use drivers::PageDriver;
pub use error::{Result, ScoutError};
pub use results::{Listing, ResultSet, SiteResults};
pub use sites::Site;

use extract::{ExtractLimits, ListingExtractor};
use std::path::Path;

/// Runs one query against a list of sites on a single page
pub struct Scout {
    query: String,
    sites: Vec<Site>,
    config: ScoutConfig,
}

impl Scout {
    /// Create a query against every supported site with default settings
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            sites: Site::ALL.to_vec(),
            config: ScoutConfig::default(),
        }
    }

    /// Restrict the sites queried, in order
    pub fn with_sites(mut self, sites: Vec<Site>) -> Self {
        self.sites = sites;
        self
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: ScoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = ScoutConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Override the number of listings kept per site
    pub fn with_results_limit(mut self, limit: usize) -> Self {
        self.config.results_limit = limit;
        self
    }

    /// Override the number of positions inspected per site
    pub fn with_max_scan_depth(mut self, depth: usize) -> Self {
        self.config.max_scan_depth = depth;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    pub fn limits(&self) -> ExtractLimits {
        ExtractLimits {
            results_limit: self.config.results_limit,
            max_scan_depth: self.config.max_scan_depth,
        }
    }

    /// Query each site in turn on the given page.
    ///
    /// Every site's cleaner is compiled before the first navigation, so a bad
    /// pattern fails the run before any scraping happens.
    pub async fn run<P: PageDriver + ?Sized>(&self, page: &mut P) -> Result<Vec<SiteResults>> {
        let extractors = self
            .sites
            .iter()
            .map(|site| ListingExtractor::new(self.config.site(*site), self.limits()))
            .collect::<Result<Vec<_>>>()?;

        let mut all_results = Vec::with_capacity(extractors.len());
        for extractor in &extractors {
            let results = extractor.run(page, &self.query).await?;
            ::log::info!(
                "{}: {} results from {} positions",
                extractor.site().name,
                results.len(),
                results.positions_scanned
            );
            if ::log::log_enabled!(::log::Level::Debug) {
                match serde_json::to_string(&results) {
                    Ok(json) => ::log::debug!("{} results: {}", extractor.site().name, json),
                    Err(e) => ::log::debug!("Could not serialize results: {}", e),
                }
            }
            all_results.push(SiteResults::new(extractor.site().name.clone(), results));
        }

        Ok(all_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::HtmlPage;

    fn amazon_page(count: usize) -> HtmlPage {
        let results: String = (0..count)
            .map(|i| {
                format!(
                    r#"<div data-index="{i}">
                        <span data-component-type="s-product-image"><a href="/Samsung-Remote/dp/B0{i}"><img></a></span>
                        <span>Best Seller</span>
                        <h2>Samsung Remote UN49J5200AF replacement #{i}</h2>
                        <span>$1{i}.99</span>
                        <span>More Buying Choices</span>
                        <span>$3.00 (4 used &amp; new offers)</span>
                    </div>"#
                )
            })
            .collect();
        HtmlPage::new(format!("<html><body>{}</body></html>", results))
    }

    #[tokio::test]
    async fn test_end_to_end_five_listings() {
        let mut page = amazon_page(5);
        let scout = Scout::new("Samsung Remote UN49J5200AF").with_sites(vec![Site::Amazon]);

        let results = scout.run(&mut page).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].site, "Amazon");
        let set = &results[0].results;
        assert_eq!(set.len(), 5);
        for (rank, listing) in set.iter() {
            assert_eq!(
                listing.title,
                format!("Samsung Remote UN49J5200AF replacement #{rank}")
            );
            assert_eq!(listing.price, format!("$1{rank}.99"));
            assert_eq!(
                listing.url,
                format!("https://www.amazon.com/Samsung-Remote/dp/B0{rank}")
            );
        }

        let report = report::format_report(&results);
        assert!(report.starts_with("Amazon\n1\ntitle : Samsung Remote"));
        assert!(report.contains("\n5\n"));
    }

    #[tokio::test]
    async fn test_builder_overrides() {
        let scout = Scout::new("remote")
            .with_results_limit(2)
            .with_max_scan_depth(4);
        assert_eq!(scout.sites(), &Site::ALL);
        assert_eq!(
            scout.limits(),
            ExtractLimits {
                results_limit: 2,
                max_scan_depth: 4
            }
        );

        let mut page = amazon_page(5);
        let results = scout.run(&mut page).await.unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.site.as_str()).collect();
        assert_eq!(names, vec!["Amazon", "eBay"]);
        assert_eq!(results[0].results.len(), 2);
        assert!(results[1].results.is_empty());
        assert!(results[1].results.truncated);
    }

    #[tokio::test]
    async fn test_bad_pattern_fails_before_navigation() {
        let mut config = ScoutConfig::default();
        let mut ebay = Site::Ebay.preset();
        ebay.cleaner.price_pattern = "(".to_string();
        config.sites.ebay = Some(ebay);

        let mut page = amazon_page(1);
        let err = Scout::new("remote")
            .with_config(config)
            .run(&mut page)
            .await
            .unwrap_err();

        assert!(matches!(err, ScoutError::Pattern(_)));
        assert_eq!(page.current_url(), None);
    }
}
