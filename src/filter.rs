use regex::Regex;

use crate::config::CleanerConfig;

/// Maximum fields kept from a result's text: title and price
pub const MAX_TEXT_FIELDS: usize = 2;

/// Strips promotional noise from the raw text of one search result.
///
/// The text is read back from the page as newline separated lines: title, badges,
/// prices, ratings and sometimes the start of a neighbouring offer block.
#[derive(Debug)]
pub struct ListingFilter {
    config: CleanerConfig,
    price_regex: Regex,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self::new(CleanerConfig::default()).expect("Default price pattern should be valid")
    }
}

impl ListingFilter {
    /// Create a new filter from configuration
    pub fn new(config: CleanerConfig) -> Result<Self, regex::Error> {
        let price_regex = Regex::new(&config.price_pattern)?;
        Ok(Self {
            config,
            price_regex,
        })
    }

    /// Reduce a result's text to `[title]` or `[title, price]`.
    ///
    /// The title is the first line surviving the denylist. The price is the first
    /// surviving line matching the price pattern at or before the more-offers marker.
    pub fn clean(&self, text: &str) -> Vec<String> {
        let lines = self.cut_at_marker(text.lines().collect());

        let kept: Vec<&str> = lines
            .into_iter()
            .filter(|line| !self.is_denied(line))
            .collect();

        let Some(title) = kept.first() else {
            return Vec::new();
        };

        std::iter::once(*title)
            .chain(kept.iter().copied().filter(|line| self.is_price(line)))
            .take(MAX_TEXT_FIELDS)
            .map(str::to_string)
            .collect()
    }

    /// Whether a line looks like a price
    pub fn is_price(&self, line: &str) -> bool {
        self.price_regex.is_match(line)
    }

    /// Whether a line is a known promotional badge
    pub fn is_denied(&self, line: &str) -> bool {
        self.config.denylist.iter().any(|denied| denied == line)
    }

    /// Drop everything after the more-offers marker. A marker on the first line is
    /// left alone.
    fn cut_at_marker<'a>(&self, mut lines: Vec<&'a str>) -> Vec<&'a str> {
        let Some(marker) = &self.config.more_offers_marker else {
            return lines;
        };

        if let Some(index) = lines.iter().position(|line| line == marker) {
            if index > 0 {
                lines.truncate(index + 1);
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests;
