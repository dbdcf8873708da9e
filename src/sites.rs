use crate::config::{CleanerConfig, SiteConfig};

/// Marker Amazon places before offers from other sellers
pub const AMAZON_MORE_OFFERS: &str = "More Buying Choices";

/// Supported storefronts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Amazon,
    Ebay,
}

impl Site {
    /// All sites, in the order they are queried
    pub const ALL: [Site; 2] = [Site::Amazon, Site::Ebay];

    /// Built-in constants for this site
    pub fn preset(self) -> SiteConfig {
        match self {
            Site::Amazon => SiteConfig {
                name: "Amazon".to_string(),
                home_url: "https://www.amazon.com".to_string(),
                search_field: "#twotabsearchtextbox".to_string(),
                result_selector: r#"div[data-index="{}"]"#.to_string(),
                link_selector:
                    r#"div[data-index="{}"] span[data-component-type="s-product-image"] a"#
                        .to_string(),
                first_position: 0,
                cleaner: CleanerConfig {
                    denylist: vec![
                        "Amazon's Choice".to_string(),
                        "Best Seller".to_string(),
                        AMAZON_MORE_OFFERS.to_string(),
                    ],
                    more_offers_marker: Some(AMAZON_MORE_OFFERS.to_string()),
                    ..CleanerConfig::default()
                },
            },
            // nth-child is 1-based
            Site::Ebay => SiteConfig {
                name: "eBay".to_string(),
                home_url: "https://www.ebay.com".to_string(),
                search_field: "#gh-ac".to_string(),
                result_selector: "ul.srp-results > li:nth-child({})".to_string(),
                link_selector: "ul.srp-results > li:nth-child({}) a.s-item__link".to_string(),
                first_position: 1,
                cleaner: CleanerConfig {
                    denylist: vec![
                        "New Listing".to_string(),
                        "SPONSORED".to_string(),
                        "Sponsored".to_string(),
                    ],
                    more_offers_marker: None,
                    ..CleanerConfig::default()
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::position_selector;

    #[test]
    fn test_presets_address_positions() {
        let amazon = Site::Amazon.preset();
        assert_eq!(
            position_selector(&amazon.result_selector, 3),
            r#"div[data-index="3"]"#
        );
        assert_eq!(amazon.first_position, 0);

        let ebay = Site::Ebay.preset();
        assert_eq!(
            position_selector(&ebay.link_selector, 2),
            "ul.srp-results > li:nth-child(2) a.s-item__link"
        );
        assert_eq!(ebay.first_position, 1);
    }

    #[test]
    fn test_amazon_marker_is_denylisted() {
        let cleaner = Site::Amazon.preset().cleaner;
        assert!(cleaner.denylist.iter().any(|l| l == AMAZON_MORE_OFFERS));
        assert_eq!(cleaner.more_offers_marker.as_deref(), Some(AMAZON_MORE_OFFERS));
    }
}
