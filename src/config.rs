use std::{fmt::Debug, io::BufReader, path::PathBuf};

use anyhow::Context;
use fs_err::File;
use serde::{Deserialize, Serialize};
use url::Url;

/// Crawl constants for the sports.fr NBA calendar.
///
/// The defaults point at the 2018-19 season; a JSON file with the same shape
/// can override any subset of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Origin that relative next-page links are resolved against.
    pub base_url: Url,
    /// Path of the first calendar page, relative to `base_url`.
    pub first_page_path: String,
    /// CSS selector matching the results table of a page.
    pub results_table_selector: String,
    /// CSS selector matching the link to the next calendar page.
    pub next_link_selector: String,
    /// `href` value marking the end of the calendar; the crawl stops when the
    /// next-page link points here.
    pub end_link_path: String,
    /// Where the workbook is written once the crawl completes.
    pub output_file: PathBuf,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://www.sports.fr").unwrap(),
            first_page_path: "/nba/2019/journees/journee2018-10-16.html".to_owned(),
            results_table_selector: ".nwResultats".to_owned(),
            next_link_selector: ".nwBtn.next".to_owned(),
            end_link_path: "/nba/2019/journees/journee.html".to_owned(),
            output_file: "nba-calendrier.xlsx".into(),
        }
    }
}

impl CrawlConfig {
    pub fn load<P: Into<PathBuf> + Debug>(path: P) -> anyhow::Result<Self> {
        let path = path.into();
        (|| serde_json::from_reader(BufReader::new(File::open(&path)?)).map_err(anyhow::Error::new))(
        )
        .with_context(|| format!("While trying to parse {path:?} as a crawl config"))
    }

    pub fn first_page(&self) -> anyhow::Result<Url> {
        self.resolve(&self.first_page_path)
    }

    /// Resolves a link target found on a page against the base origin.
    pub fn resolve(&self, href: &str) -> anyhow::Result<Url> {
        self.base_url
            .join(href)
            .with_context(|| format!("Cannot resolve {href:?} against {}", self.base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::CrawlConfig;

    #[test]
    fn test_default_first_page() {
        let config = CrawlConfig::default();
        let url = config.first_page().unwrap();
        assert_eq!(
            url.as_str(),
            "http://www.sports.fr/nba/2019/journees/journee2018-10-16.html"
        );
    }

    #[test]
    fn test_resolve_relative_link() {
        let config = CrawlConfig::default();
        let url = config.resolve("/nba/2019/journees/journee2018-10-17.html").unwrap();
        assert_eq!(
            url.as_str(),
            "http://www.sports.fr/nba/2019/journees/journee2018-10-17.html"
        );
    }
}
