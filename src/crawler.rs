use anyhow::Context;
use log::info;
use scraper::Html;
use url::Url;

use crate::{
    api::SportsClient,
    config::CrawlConfig,
    parser::{self, PageSelectors},
    workbook::Workbook,
};

/// Outcome of extracting one page: either the resolved URL of the next page,
/// or the end of the calendar.
#[derive(Debug)]
pub enum NextPage {
    Continue(Url),
    Done,
}

/// Fetches one calendar page, appends its results as a new sheet, and reports
/// where the crawl goes next.
pub async fn extract_page(
    client: &SportsClient,
    config: &CrawlConfig,
    selectors: &PageSelectors,
    page: &Url,
    workbook: &mut Workbook,
) -> anyhow::Result<NextPage> {
    let html = client.fetch(page).await?;
    let extracted = parser::parse(&Html::parse_document(&html), selectors)
        .with_context(|| format!("While parsing {page}"))?;

    let name = parser::derive_sheet_name(&extracted.title)?;
    info!("  {} games on sheet {name}", extracted.matches.len());
    let sheet = workbook.add_sheet(name);
    for record in extracted.matches {
        sheet.add_row(record);
    }

    if extracted.next_href == config.end_link_path {
        return Ok(NextPage::Done);
    }
    Ok(NextPage::Continue(config.resolve(&extracted.next_href)?))
}

/// Walks the calendar from the configured first page until a page's next link
/// points at the end sentinel, accumulating one sheet per page.  Strictly
/// sequential: page N's HTML is the sole source of page N+1's URL.  Returns
/// the number of pages visited.
///
/// Errors propagate to the caller; the workbook is not persisted here, so a
/// failed crawl never leaves partial output behind.
pub async fn crawl(
    client: &SportsClient,
    config: &CrawlConfig,
    workbook: &mut Workbook,
) -> anyhow::Result<usize> {
    let selectors = PageSelectors::new(config)?;
    let mut current = config.first_page()?;
    let mut visited = 0;
    loop {
        info!("Fetching page {}: {current}", visited + 1);
        let next = extract_page(client, config, &selectors, &current, workbook).await?;
        visited += 1;
        match next {
            NextPage::Continue(url) => current = url,
            NextPage::Done => return Ok(visited),
        }
    }
}
