use url::Url;

/// Fill the `{}` placeholder of a selector template with a result position
pub fn position_selector(template: &str, position: usize) -> String {
    template.replace("{}", &position.to_string())
}

/// Resolve a possibly relative link against the site's base URL.
///
/// Links that cannot be resolved are returned unchanged.
pub fn absolute_url(base: &str, href: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            ::log::debug!("Could not resolve {} against {}: {}", href, base, e);
            href.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_selector() {
        assert_eq!(position_selector("li:nth-child({})", 4), "li:nth-child(4)");
        assert_eq!(position_selector("#static", 4), "#static");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://www.amazon.com", "/dp/B00TEST/ref=sr_1_1"),
            "https://www.amazon.com/dp/B00TEST/ref=sr_1_1"
        );
        assert_eq!(
            absolute_url("https://www.amazon.com", "https://www.ebay.com/itm/1"),
            "https://www.ebay.com/itm/1"
        );
        assert_eq!(absolute_url("not a url", "/dp/1"), "/dp/1");
    }
}
