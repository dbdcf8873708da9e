use serde::Serialize;
use std::collections::BTreeMap;

/// One scraped product record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    /// Product title (first line of the result text)
    pub title: String,

    /// Currency-prefixed price as shown on the page
    pub price: String,

    /// Detail page URL
    pub url: String,
}

impl Listing {
    /// Create a new listing
    pub fn new(title: String, price: String, url: String) -> Self {
        Self { title, price, url }
    }

    /// Build a listing from cleaned text fields plus a link.
    ///
    /// Returns `None` unless the fields form exactly `[title, price]`.
    pub fn from_fields(fields: Vec<String>, url: String) -> Option<Self> {
        let [title, price]: [String; 2] = fields.try_into().ok()?;
        Some(Self::new(title, price, url))
    }

    /// Labelled fields in display order
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("title", &self.title),
            ("price", &self.price),
            ("URL", &self.url),
        ]
    }
}

/// Ranked listings for one site and query.
///
/// Ranks are assigned in scrape order, so a rank says nothing about where the
/// listing sat on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    /// Zero-based rank to listing
    pub listings: BTreeMap<usize, Listing>,

    /// Number of candidate positions inspected
    pub positions_scanned: usize,

    /// Whether scanning stopped at the scan bound before the limit was reached
    pub truncated: bool,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listing under the next rank and return that rank
    pub fn push(&mut self, listing: Listing) -> usize {
        let rank = self.listings.len();
        self.listings.insert(rank, listing);
        rank
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, rank: usize) -> Option<&Listing> {
        self.listings.get(&rank)
    }

    /// Iterate listings in rank order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Listing)> {
        self.listings.iter().map(|(rank, listing)| (*rank, listing))
    }
}

/// Results of one site query, labelled with the site's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteResults {
    pub site: String,
    pub results: ResultSet,
}

impl SiteResults {
    pub fn new(site: impl Into<String>, results: ResultSet) -> Self {
        Self {
            site: site.into(),
            results,
        }
    }
}
