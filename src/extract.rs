use crate::config::SiteConfig;
use crate::drivers::{DriverError, PageDriver};
use crate::error::Result;
use crate::filter::ListingFilter;
use crate::results::{Listing, ResultSet};
use crate::utils::{absolute_url, position_selector};

/// How far the extractor may go on one results page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractLimits {
    /// Maximum listings kept
    pub results_limit: usize,

    /// Maximum candidate positions inspected
    pub max_scan_depth: usize,
}

impl Default for ExtractLimits {
    fn default() -> Self {
        Self {
            results_limit: 5,
            max_scan_depth: 50,
        }
    }
}

/// Searches one site and collects the first complete listings
#[derive(Debug)]
pub struct ListingExtractor {
    site: SiteConfig,
    filter: ListingFilter,
    limits: ExtractLimits,
}

impl ListingExtractor {
    /// Create an extractor, compiling the site's cleaner vocabulary
    pub fn new(site: SiteConfig, limits: ExtractLimits) -> Result<Self> {
        let filter = ListingFilter::new(site.cleaner.clone())?;
        Ok(Self {
            site,
            filter,
            limits,
        })
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Open the site, submit the query and collect listings
    pub async fn run<P: PageDriver + ?Sized>(&self, page: &mut P, query: &str) -> Result<ResultSet> {
        self.search(page, query).await?;
        self.extract(page).await
    }

    /// Type the query into the site's search field and submit it
    pub async fn search<P: PageDriver + ?Sized>(&self, page: &mut P, query: &str) -> Result<()> {
        ::log::info!("Querying {} for: {}", self.site.name, query);
        page.goto(&self.site.home_url).await?;
        page.send_keys(&self.site.search_field, query).await?;
        page.submit(&self.site.search_field).await?;
        Ok(())
    }

    /// Walk result positions on the current page.
    ///
    /// Positions without a readable result or link, or whose text yields no price,
    /// are skipped without consuming a rank.
    pub async fn extract<P: PageDriver + ?Sized>(&self, page: &mut P) -> Result<ResultSet> {
        let mut results = ResultSet::new();
        let mut position = self.site.first_position;

        while results.len() < self.limits.results_limit {
            if results.positions_scanned >= self.limits.max_scan_depth {
                ::log::warn!(
                    "{}: stopped after scanning {} positions with {} of {} results",
                    self.site.name,
                    results.positions_scanned,
                    results.len(),
                    self.limits.results_limit
                );
                results.truncated = true;
                break;
            }

            results.positions_scanned += 1;
            if let Some(listing) = self.read_position(page, position).await? {
                let rank = results.push(listing);
                ::log::info!(
                    "{} #{} (position {}): {}",
                    self.site.name,
                    rank + 1,
                    position,
                    results.listings[&rank].title
                );
            }
            position += 1;
        }

        Ok(results)
    }

    /// Read one candidate position. `Ok(None)` means the position is skipped.
    async fn read_position<P: PageDriver + ?Sized>(
        &self,
        page: &mut P,
        position: usize,
    ) -> Result<Option<Listing>> {
        let result_selector = position_selector(&self.site.result_selector, position);
        let link_selector = position_selector(&self.site.link_selector, position);

        let Some(text) = skip_missing(page.text(&result_selector).await, position)? else {
            return Ok(None);
        };
        let Some(href) = skip_missing(page.attr(&link_selector, "href").await, position)?
            .flatten()
        else {
            ::log::debug!("Position {} has no link, skipping", position);
            return Ok(None);
        };

        let fields = self.filter.clean(&text);
        let url = absolute_url(&self.site.home_url, &href);

        match Listing::from_fields(fields, url) {
            Some(listing) => Ok(Some(listing)),
            None => {
                ::log::debug!("Position {} is incomplete, skipping", position);
                Ok(None)
            }
        }
    }
}

/// Turn a missing element into `None`; any other driver failure is fatal
fn skip_missing<T>(
    read: std::result::Result<T, DriverError>,
    position: usize,
) -> Result<Option<T>> {
    match read {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => {
            ::log::debug!("Position {}: {}, skipping", position, e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
