use clap::{Parser, ValueEnum};
use shop_query::Site;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shop-query")]
#[command(about = "Looks up a product on shopping sites and emails the top listings")]
#[command(version)]
pub struct Args {
    /// Product to search for
    pub query: String,

    /// Email address to send the results to
    pub recipient: Option<String>,

    /// Site to query
    #[arg(short, long, value_enum, default_value_t = SiteArg::All)]
    pub site: SiteArg,

    /// Listings kept per site
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Maximum result positions inspected per site
    #[arg(long)]
    pub max_scan: Option<usize>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Replay a saved results page instead of driving a browser
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SiteArg {
    Amazon,
    Ebay,
    All,
}

/// Convert from CLI site argument to the sites to query
pub fn convert_site_arg(arg: SiteArg) -> Vec<Site> {
    match arg {
        SiteArg::Amazon => vec![Site::Amazon],
        SiteArg::Ebay => vec![Site::Ebay],
        SiteArg::All => Site::ALL.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let args =
            Args::try_parse_from(["shop-query", "Samsung Remote UN49J5200AF", "me@example.com"])
                .unwrap();
        assert_eq!(args.query, "Samsung Remote UN49J5200AF");
        assert_eq!(args.recipient.as_deref(), Some("me@example.com"));
        assert_eq!(args.site, SiteArg::All);
        assert_eq!(args.limit, None);
        assert!(!args.headed);
    }

    #[test]
    fn test_recipient_is_optional() {
        let args = Args::try_parse_from(["shop-query", "remote", "--site", "ebay", "-l", "3"])
            .unwrap();
        assert_eq!(args.recipient, None);
        assert_eq!(convert_site_arg(args.site), vec![Site::Ebay]);
        assert_eq!(args.limit, Some(3));
    }

    #[test]
    fn test_query_is_required() {
        assert!(Args::try_parse_from(["shop-query"]).is_err());
    }
}
