//! Spreadsheet dataset store
//!
//! One worksheet per file: a header row of column labels followed by one
//! row per record. Every cell is written as text so dates and document
//! numbers survive a round trip untouched. Title cells are hyperlinks to
//! the record's link.

use crate::catalog::{CatalogRecord, Column, Dataset};
use crate::storage::traits::{DatasetStore, StorageError, StorageResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::collections::HashSet;
use std::path::Path;

/// Longest URL a worksheet hyperlink may hold
const MAX_URL_LEN: usize = 2079;

/// Dataset store backed by `.xlsx` workbooks
#[derive(Debug, Clone)]
pub struct XlsxStore {
    sheet_name: String,
}

impl XlsxStore {
    pub fn new(sheet_name: &str) -> Self {
        Self {
            sheet_name: sheet_name.to_string(),
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

impl DatasetStore for XlsxStore {
    fn load(&self, path: &Path) -> StorageResult<Dataset> {
        let read_error = |e: calamine::XlsxError| StorageError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut workbook: Xlsx<_> = open_workbook(path).map_err(read_error)?;

        // Prefer the catalog sheet, fall back to whatever comes first
        let sheet_names = workbook.sheet_names();
        let sheet = if sheet_names.iter().any(|name| *name == self.sheet_name) {
            self.sheet_name.clone()
        } else {
            sheet_names
                .first()
                .cloned()
                .ok_or_else(|| StorageError::NoSheet(path.display().to_string()))?
        };

        let range = workbook.worksheet_range(&sheet).map_err(read_error)?;
        let mut rows = range.rows();
        let header = rows
            .next()
            .ok_or_else(|| StorageError::MissingHeader(sheet.clone()))?;
        let columns = parse_header(header)?;

        let mut records = Vec::new();
        for row in rows {
            let mut record = CatalogRecord::default();
            let mut blank = true;
            for (index, column) in columns.iter().enumerate() {
                let text = row.get(index).map(cell_text).unwrap_or_default();
                blank &= text.trim().is_empty();
                record.set_field(*column, &text);
            }
            if !blank {
                records.push(record);
            }
        }

        tracing::debug!(
            "Loaded {} records from sheet '{}' of {}",
            records.len(),
            sheet,
            path.display()
        );
        Ok(Dataset::with_columns(columns, records))
    }

    fn save(&self, dataset: Dataset, path: &Path) -> StorageResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, column) in dataset.columns.iter().enumerate() {
            worksheet.write_string(0, col as u16, column.label())?;
        }

        for (index, record) in dataset.records.iter().enumerate() {
            let row = (index + 1) as u32;
            for (col, column) in dataset.columns.iter().enumerate() {
                write_cell(worksheet, row, col as u16, *column, record)?;
            }
        }

        workbook.save(path)?;
        tracing::debug!("Wrote {} records to {}", dataset.len(), path.display());
        Ok(())
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    column: Column,
    record: &CatalogRecord,
) -> StorageResult<()> {
    if column == Column::Title && is_linkable(&record.link) {
        worksheet.write_url_with_text(row, col, record.link.as_str(), record.title.as_str())?;
    } else {
        worksheet.write_string(row, col, record.field(column))?;
    }
    Ok(())
}

fn is_linkable(link: &str) -> bool {
    (link.starts_with("http://") || link.starts_with("https://")) && link.len() <= MAX_URL_LEN
}

/// Maps header labels to columns; trailing blank cells are ignored
fn parse_header(header: &[Data]) -> StorageResult<Vec<Column>> {
    let labels: Vec<String> = header.iter().map(cell_text).collect();
    let used = labels
        .iter()
        .rposition(|label| !label.trim().is_empty())
        .map_or(0, |last| last + 1);

    let mut columns = Vec::with_capacity(used);
    let mut seen = HashSet::new();
    for label in &labels[..used] {
        let column =
            Column::from_label(label).ok_or_else(|| StorageError::UnknownColumn(label.clone()))?;
        if !seen.insert(column) {
            return Err(StorageError::DuplicateColumn(column));
        }
        columns.push(column);
    }

    if let Some(missing) = Column::CANONICAL
        .into_iter()
        .find(|c| c.is_required() && !seen.contains(c))
    {
        return Err(StorageError::MissingColumn(missing));
    }

    Ok(columns)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| value.as_f64().to_string()),
        other => other.to_string(),
    }
}
