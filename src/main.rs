use clap::Parser;
use shop_query::drivers::{BrowserOptions, HtmlPage, PageDriver, WebDriverPage};
use shop_query::notify::{Delivery, Notifier};
use shop_query::{Result, Scout, ScoutConfig, ScoutError, SiteResults, report};

mod args;
use args::{Args, convert_site_arg};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("{}", e);
        std::process::exit(1);
    }

    ::log::info!("Finished!");
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ScoutConfig::from_file(path)?,
        None => ScoutConfig::default(),
    };
    if args.headed {
        config.headless = false;
    }

    let mut scout = Scout::new(args.query.clone())
        .with_sites(convert_site_arg(args.site))
        .with_config(config);
    if let Some(limit) = args.limit {
        scout = scout.with_results_limit(limit);
    }
    if let Some(depth) = args.max_scan {
        scout = scout.with_max_scan_depth(depth);
    }

    let results = match &args.html {
        Some(path) => {
            if scout.sites().len() != 1 {
                return Err(ScoutError::Config(
                    "--html replays a single page; choose one --site".to_string(),
                ));
            }
            let mut page = HtmlPage::from_file(path)?;
            ::log::info!("Replaying {}", path.display());
            query(&scout, &mut page).await?
        }
        None => {
            let options = BrowserOptions::from_env(scout.config());
            options.validate()?;
            let mut page = WebDriverPage::connect(&options).await?;
            query(&scout, &mut page).await?
        }
    };

    let body = report::format_report(&results);
    println!("{}", body);

    if let Some(recipient) = &args.recipient {
        let notifier = Notifier::from_env(scout.config().smtp.clone());
        if notifier.send(recipient, scout.query(), &body).await? == Delivery::Sent {
            println!("Results sent to {}", recipient);
        }
    }

    Ok(())
}

/// Run the queries and release the page whether or not they succeeded
async fn query<P: PageDriver>(scout: &Scout, page: &mut P) -> Result<Vec<SiteResults>> {
    let results = scout.run(page).await;

    if let Err(e) = page.close().await {
        ::log::warn!("Failed to close page: {}", e);
    }

    results
}
