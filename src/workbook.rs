use std::path::Path;

use anyhow::Context;
use getset::Getters;
use log::debug;

use crate::schema::{MatchRecord, SheetName};

/// Header labels of every sheet, in column order.
pub const HEADERS: [&str; 5] = [
    "Heure",
    "Equipe à domicile",
    "Score",
    "Score",
    "Equipe à l'extérieur",
];

/// Accumulated output of a crawl: one sheet per visited page, in crawl order.
/// Serialized to disk exactly once, after the crawl terminates.
#[derive(Debug, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

#[derive(Debug, Getters)]
pub struct Sheet {
    #[getset(get = "pub")]
    name: SheetName,
    #[getset(get = "pub")]
    rows: Vec<MatchRecord>,
    visible: bool,
}

impl Sheet {
    pub fn add_row(&mut self, record: MatchRecord) {
        self.rows.push(record);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Appends a new visible sheet.  Pages are assumed to have distinct date
    /// labels; if one repeats anyway, the name gets a numeric suffix rather
    /// than clobbering an existing sheet.
    pub fn add_sheet(&mut self, name: SheetName) -> &mut Sheet {
        let name = self.dedup_name(name);
        let index = self.sheets.len();
        self.sheets.push(Sheet {
            name,
            rows: vec![],
            visible: true,
        });
        &mut self.sheets[index]
    }

    fn dedup_name(&self, name: SheetName) -> SheetName {
        let taken = |candidate: &SheetName| self.sheets.iter().any(|s| &s.name == candidate);
        if !taken(&name) {
            return name;
        }
        (2..)
            .map(|n| SheetName::from(format!("{name} ({n})")))
            .find(|candidate| !taken(candidate))
            .unwrap() // (2..) is unbounded
    }

    /// Writes the workbook as an xlsx file.  A crawl that visited no pages
    /// still produces a valid (empty) workbook.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let mut book = rust_xlsxwriter::Workbook::new();
        for sheet in &self.sheets {
            debug!("Writing sheet {} ({} rows)", sheet.name, sheet.rows.len());
            let worksheet = book.add_worksheet();
            worksheet.set_name(sheet.name.to_string())?;
            worksheet.set_hidden(!sheet.visible);
            for (column, header) in HEADERS.iter().enumerate() {
                worksheet.write_string(0, column as u16, *header)?;
            }
            for (index, record) in sheet.rows.iter().enumerate() {
                let row = index as u32 + 1;
                worksheet.write_string(row, 0, record.time().to_string())?;
                worksheet.write_string(row, 1, record.home_team().to_string())?;
                worksheet.write_string(row, 2, record.home_score().to_string())?;
                worksheet.write_string(row, 3, record.away_score().to_string())?;
                worksheet.write_string(row, 4, record.away_team().to_string())?;
            }
        }
        book.save(path)
            .with_context(|| format!("While writing workbook to {path:?}"))?;
        Ok(())
    }
}
