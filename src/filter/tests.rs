use super::*;
use crate::sites::Site;

fn amazon_filter() -> ListingFilter {
    ListingFilter::new(Site::Amazon.preset().cleaner).unwrap()
}

#[test]
fn test_badges_marker_and_cap() {
    let text = "Amazon's Choice\nWidget\n$9.99\n$19.99\nMore Buying Choices\n$5 used";
    assert_eq!(amazon_filter().clean(text), vec!["Widget", "$9.99"]);
}

#[test]
fn test_title_only_without_price() {
    let text = "Samsung Remote\n4.5 out of 5 stars\n1,204";
    assert_eq!(amazon_filter().clean(text), vec!["Samsung Remote"]);
}

#[test]
fn test_already_clean_pair_is_unchanged() {
    let filter = amazon_filter();
    let cleaned = filter.clean("Best Seller\nWidget\n4.7 out of 5\n$9.99\n$12.00");
    assert_eq!(cleaned, vec!["Widget", "$9.99"]);

    let again = filter.clean(&cleaned.join("\n"));
    assert_eq!(again, cleaned);
}

#[test]
fn test_prices_after_marker_are_ignored() {
    let text = "Widget\nMore Buying Choices\n$3.50 (12 used & new offers)";
    assert_eq!(amazon_filter().clean(text), vec!["Widget"]);
}

#[test]
fn test_marker_on_first_line_does_not_truncate() {
    let text = "More Buying Choices\nWidget\n$7.25";
    assert_eq!(amazon_filter().clean(text), vec!["Widget", "$7.25"]);
}

#[test]
fn test_empty_and_fully_denied_text() {
    let filter = amazon_filter();
    assert!(filter.clean("").is_empty());
    assert!(filter.clean("Amazon's Choice\nBest Seller").is_empty());
}

#[test]
fn test_denylist_matches_whole_lines_only() {
    let text = "Best Seller in TV Remotes\n$4.99";
    assert_eq!(
        amazon_filter().clean(text),
        vec!["Best Seller in TV Remotes", "$4.99"]
    );
}

#[test]
fn test_title_that_looks_like_a_price() {
    // The first line is always the title, and is still eligible as the price.
    let text = "$5 Gift Card\n$5.00";
    assert_eq!(amazon_filter().clean(text), vec!["$5 Gift Card", "$5 Gift Card"]);
}

#[test]
fn test_ebay_vocabulary() {
    let filter = ListingFilter::new(Site::Ebay.preset().cleaner).unwrap();
    let text = "New Listing\nSamsung Remote UN49J5200AF\nBrand New\n$8.95\nFree shipping";
    assert_eq!(
        filter.clean(text),
        vec!["Samsung Remote UN49J5200AF", "$8.95"]
    );
}

#[test]
fn test_custom_currency_pattern() {
    let filter = ListingFilter::new(CleanerConfig {
        price_pattern: r"^(£|€)".to_string(),
        ..CleanerConfig::default()
    })
    .unwrap();
    assert_eq!(filter.clean("Widget\n$9.99\n€8,50"), vec!["Widget", "€8,50"]);
}

#[test]
fn test_invalid_pattern_is_rejected() {
    let result = ListingFilter::new(CleanerConfig {
        price_pattern: "(".to_string(),
        ..CleanerConfig::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_default_filter_has_no_denylist() {
    let filter = ListingFilter::default();
    assert!(!filter.is_denied("Best Seller"));
    assert!(filter.is_price("$1"));
    assert!(!filter.is_price("USD 1"));
}
