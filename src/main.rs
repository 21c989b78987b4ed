use std::path::PathBuf;

use clap::Parser;
use log::info;
use sportsfr_scraping::api::SportsClient;
use sportsfr_scraping::config::CrawlConfig;
use sportsfr_scraping::crawler;
use sportsfr_scraping::workbook::Workbook;

/// Scrapes the sports.fr NBA calendar into a multi-sheet xlsx workbook,
/// one sheet per game day.
#[derive(Parser)]
struct Opts {
    /// JSON file overriding the built-in crawl configuration
    #[arg(long)]
    config_path: Option<PathBuf>,
    /// Where to write the workbook (overrides the configured path)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Path of the first calendar page, relative to the base origin
    #[arg(long)]
    first_page: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let mut config = match &opts.config_path {
        Some(path) => CrawlConfig::load(path)?,
        None => CrawlConfig::default(),
    };
    if let Some(output) = opts.output {
        config.output_file = output;
    }
    if let Some(first_page) = opts.first_page {
        config.first_page_path = first_page;
    }

    let client = SportsClient::new()?;
    let mut workbook = Workbook::new();
    let pages = crawler::crawl(&client, &config, &mut workbook).await?;
    workbook.save(&config.output_file)?;
    info!(
        "Successfully saved {pages} sheets to {:?}.",
        config.output_file
    );
    Ok(())
}
