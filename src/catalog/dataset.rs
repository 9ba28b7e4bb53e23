use crate::catalog::CatalogRecord;
use std::fmt;

/// A column of the catalog table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Title,
    IssuingOrg,
    DocNumber,
    IssueDate,
    Link,
}

impl Column {
    /// Column order of freshly crawled datasets
    pub const CANONICAL: [Column; 5] = [
        Column::Title,
        Column::IssuingOrg,
        Column::DocNumber,
        Column::IssueDate,
        Column::Link,
    ];

    /// Header label as it appears in dataset files
    pub fn label(&self) -> &'static str {
        match self {
            Column::Title => "标题",
            Column::IssuingOrg => "发文单位",
            Column::DocNumber => "文号",
            Column::IssueDate => "发文日期",
            Column::Link => "链接",
        }
    }

    /// Maps a header label back to its column
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::CANONICAL.into_iter().find(|c| c.label() == label)
    }

    /// Columns a dataset file cannot do without
    pub fn is_required(&self) -> bool {
        matches!(self, Column::Title | Column::IssueDate | Column::Link)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered catalog records plus the column order they are stored in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub records: Vec<CatalogRecord>,
}

impl Dataset {
    /// A dataset with the canonical column order
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            columns: Column::CANONICAL.to_vec(),
            records,
        }
    }

    /// A dataset that keeps a column order inherited from elsewhere
    pub fn with_columns(columns: Vec<Column>, records: Vec<CatalogRecord>) -> Self {
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cells of one record in this dataset's column order
    pub fn row<'a>(&'a self, record: &'a CatalogRecord) -> impl Iterator<Item = &'a str> + 'a {
        self.columns.iter().map(move |c| record.field(*c))
    }
}
