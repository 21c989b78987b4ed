use anyhow::{anyhow, bail, Context};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};

use crate::{
    config::CrawlConfig,
    schema::{DateLabel, MatchRecord, SheetName},
};

/// Logical columns of the results table: title/date, time, home team,
/// combined score, away team.
const COLUMN_COUNT: usize = 5;

/// Compiled selectors for the two page elements the crawl depends on.
/// Built once per run so the selector strategy stays a config concern
/// and the parse functions stay pure.
pub struct PageSelectors {
    results_table: Selector,
    next_link: Selector,
}

impl PageSelectors {
    pub fn new(config: &CrawlConfig) -> anyhow::Result<Self> {
        Ok(Self {
            results_table: parse_selector(&config.results_table_selector)?,
            next_link: parse_selector(&config.next_link_selector)?,
        })
    }
}

fn parse_selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid CSS selector {css:?}: {e}"))
}

/// Everything extracted from one calendar page.
#[derive(Debug)]
pub struct CalendarPage {
    pub title: DateLabel,
    pub matches: Vec<MatchRecord>,
    /// Raw `href` of the next-page link, not yet resolved.
    pub next_href: String,
}

pub fn parse(html: &Html, selectors: &PageSelectors) -> anyhow::Result<CalendarPage> {
    let table = html
        .select(&selectors.results_table)
        .next()
        .context("Results table not found")?;
    let raw = RawTable::from_element(table)?;

    let title: DateLabel = raw.title().into();
    let matches = (1..raw.height())
        .map(|row| raw.match_at(row))
        .try_collect::<_, Vec<_>, _>()?;

    let next_href = html
        .select(&selectors.next_link)
        .next()
        .context("Next-page link not found")?
        .value()
        .attr("href")
        .context("Next-page link has no `href` attribute")?
        .to_owned();

    Ok(CalendarPage {
        title,
        matches,
        next_href,
    })
}

/// Derives a sheet name from the table title: `NBA - 16/10/2018` becomes
/// `16-10-2018`.  The date segment after the first `-` is trimmed and its
/// slashes replaced so the name is safe as a workbook tab.
pub fn derive_sheet_name(title: &DateLabel) -> anyhow::Result<SheetName> {
    let date = AsRef::<str>::as_ref(title)
        .split('-')
        .nth(1)
        .with_context(|| format!("Table title {title:?} has no date segment after `-`"))?;
    Ok(date.trim().replace('/', "-").into())
}

/// Cell-by-cell view of the results table, column major.  Row 0 holds the
/// title cell (replicated across all columns, as the title row spans the
/// table); rows 1.. are game entries.
struct RawTable {
    columns: [Vec<String>; COLUMN_COUNT],
}

impl RawTable {
    fn from_element(table: ElementRef) -> anyhow::Result<Self> {
        let mut columns: [Vec<String>; COLUMN_COUNT] = Default::default();
        for row in table.select(selector!("tr")) {
            let cells = row
                .select(selector!("th, td"))
                .map(cell_text)
                .collect_vec();
            match cells.len() {
                // A single cell spans the whole row (the title row).
                1 => {
                    for column in &mut columns {
                        column.push(cells[0].clone());
                    }
                }
                COLUMN_COUNT => {
                    for (column, cell) in columns.iter_mut().zip(cells) {
                        column.push(cell);
                    }
                }
                n => bail!("Expected 1 or {COLUMN_COUNT} cells in a table row, found {n}"),
            }
        }
        let height = columns[0].len();
        if height == 0 {
            bail!("Results table has no rows");
        }
        if columns.iter().any(|column| column.len() != height) {
            bail!("Inconsistent row count across table columns");
        }
        Ok(Self { columns })
    }

    fn height(&self) -> usize {
        self.columns[0].len()
    }

    fn title(&self) -> &str {
        &self.columns[0][0]
    }

    fn match_at(&self, row: usize) -> anyhow::Result<MatchRecord> {
        let score = &self.columns[3][row];
        let (home_score, away_score) = score
            .split_once('-')
            .with_context(|| format!("Malformed score cell {score:?}, expected \"home-away\""))?;
        Ok(MatchRecord::builder()
            .time(self.columns[1][row].as_str().into())
            .home_team(self.columns[2][row].as_str().into())
            .home_score(home_score.into())
            .away_score(away_score.into())
            .away_team(self.columns[4][row].as_str().into())
            .build())
    }
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_owned()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use crate::config::CrawlConfig;
    use crate::schema::DateLabel;

    use super::{derive_sheet_name, parse, PageSelectors};

    fn selectors() -> PageSelectors {
        PageSelectors::new(&CrawlConfig::default()).unwrap()
    }

    fn calendar_html(title: &str, rows: &[[&str; 5]], next_href: &str) -> String {
        let mut table = format!(r#"<table class="nwResultats"><tr><th colspan="5">{title}</th></tr>"#);
        for row in rows {
            table.push_str("<tr>");
            for cell in row {
                table.push_str(&format!("<td>{cell}</td>"));
            }
            table.push_str("</tr>");
        }
        table.push_str("</table>");
        format!(
            r#"<html><body>{table}<a class="nwBtn next" href="{next_href}">Journée suivante</a></body></html>"#
        )
    }

    #[test]
    fn test_parse_page() {
        let html = calendar_html(
            "NBA - 16/10/2018",
            &[
                ["16/10", "01:00", "Boston", "105-87", "Philadelphie"],
                ["16/10", "04:30", "Golden State", "108-100", "Oklahoma City"],
            ],
            "/nba/2019/journees/journee2018-10-17.html",
        );
        let page = parse(&Html::parse_document(&html), &selectors()).unwrap();
        assert_eq!(page.title, "NBA - 16/10/2018".into());
        assert_eq!(page.next_href, "/nba/2019/journees/journee2018-10-17.html");
        assert_eq!(page.matches.len(), 2);

        let first = &page.matches[0];
        assert_eq!(first.time(), &"01:00".into());
        assert_eq!(first.home_team(), &"Boston".into());
        assert_eq!(first.home_score(), &"105".into());
        assert_eq!(first.away_score(), &"87".into());
        assert_eq!(first.away_team(), &"Philadelphie".into());
    }

    #[test]
    fn test_score_split_round_trips() {
        let html = calendar_html(
            "NBA - 16/10/2018",
            &[["16/10", "01:00", "Boston", "102-98", "Philadelphie"]],
            "/next.html",
        );
        let page = parse(&Html::parse_document(&html), &selectors()).unwrap();
        let record = &page.matches[0];
        assert_eq!(record.home_score(), &"102".into());
        assert_eq!(record.away_score(), &"98".into());
        assert_eq!(
            format!("{}-{}", record.home_score(), record.away_score()),
            "102-98"
        );
    }

    #[test]
    fn test_malformed_score_fails() {
        let html = calendar_html(
            "NBA - 16/10/2018",
            &[["16/10", "01:00", "Boston", "reporté", "Philadelphie"]],
            "/next.html",
        );
        let err = parse(&Html::parse_document(&html), &selectors()).unwrap_err();
        assert!(err.to_string().contains("Malformed score cell"));
    }

    #[test]
    fn test_missing_table_fails() {
        let html = r#"<html><body><p>rien</p></body></html>"#;
        let err = parse(&Html::parse_document(html), &selectors()).unwrap_err();
        assert!(err.to_string().contains("Results table not found"));
    }

    #[test]
    fn test_missing_next_link_fails() {
        let html = r#"<html><body><table class="nwResultats"><tr><th>NBA - 16/10/2018</th></tr></table></body></html>"#;
        let err = parse(&Html::parse_document(html), &selectors()).unwrap_err();
        assert!(err.to_string().contains("Next-page link not found"));
    }

    #[test]
    fn test_unexpected_row_shape_fails() {
        let html = r#"<html><body><table class="nwResultats">
            <tr><th colspan="5">NBA - 16/10/2018</th></tr>
            <tr><td>01:00</td><td>Boston</td><td>105-87</td></tr>
        </table><a class="nwBtn next" href="/next.html">suite</a></body></html>"#;
        let err = parse(&Html::parse_document(html), &selectors()).unwrap_err();
        assert!(err.to_string().contains("Expected 1 or 5 cells"));
    }

    #[test]
    fn test_sheet_name_derivation() {
        let title = DateLabel::from("NBA - 16/10/2018");
        let name = derive_sheet_name(&title).unwrap();
        assert_eq!(name, "16-10-2018".to_owned().into());
        // Idempotent and free of path separators.
        assert_eq!(derive_sheet_name(&title).unwrap(), name);
        assert!(!name.to_string().contains('/'));
    }

    #[test]
    fn test_sheet_name_requires_date_segment() {
        let err = derive_sheet_name(&DateLabel::from("NBA 16/10/2018")).unwrap_err();
        assert!(err.to_string().contains("no date segment"));
    }
}
