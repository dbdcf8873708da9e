use crate::results::{ResultSet, SiteResults};

/// Render every site's results as one plain text block
pub fn format_report(sites: &[SiteResults]) -> String {
    let mut out = String::new();
    for site in sites {
        out.push_str(&format_site(&site.site, &site.results));
    }
    out
}

/// Render one site: its name, then each listing under a 1-based label
pub fn format_site(name: &str, results: &ResultSet) -> String {
    let mut out = format!("{}\n", name);

    if results.is_empty() {
        out.push_str("No results found\n\n");
        return out;
    }

    for (rank, listing) in results.iter() {
        out.push_str(&format!("{}\n", rank + 1));
        for (key, value) in listing.fields() {
            out.push_str(&format!("{} : {}\n", key, value));
        }
        out.push_str("\n\n");
    }
    out
}
