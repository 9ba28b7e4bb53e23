use crate::catalog::{Column, IssueDate};

/// One listed regulatory document
///
/// `title` and `link` are non-empty for every record produced by the
/// extractor; the remaining fields may be empty when the listing omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CatalogRecord {
    pub title: String,
    pub issuing_org: String,
    pub doc_number: String,
    pub issue_date: IssueDate,
    pub link: String,
}

impl CatalogRecord {
    /// Returns the cell text for a column
    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::Title => &self.title,
            Column::IssuingOrg => &self.issuing_org,
            Column::DocNumber => &self.doc_number,
            Column::IssueDate => self.issue_date.as_str(),
            Column::Link => &self.link,
        }
    }

    /// Sets a field from cell text
    pub fn set_field(&mut self, column: Column, value: &str) {
        let value = value.trim();
        match column {
            Column::Title => self.title = value.to_string(),
            Column::IssuingOrg => self.issuing_org = value.to_string(),
            Column::DocNumber => self.doc_number = value.to_string(),
            Column::IssueDate => self.issue_date = IssueDate::parse(value),
            Column::Link => self.link = value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_roundtrip_through_columns() {
        let mut record = CatalogRecord::default();
        for column in Column::CANONICAL {
            record.set_field(column, match column {
                Column::Title => " 关于调整增值税税率的通知 ",
                Column::IssuingOrg => "财政部",
                Column::DocNumber => "财税〔2018〕32号",
                Column::IssueDate => "2018/4/4",
                Column::Link => "http://www.chinaacc.com/fagui/a.shtml",
            });
        }

        assert_eq!(record.field(Column::Title), "关于调整增值税税率的通知");
        assert_eq!(record.field(Column::IssueDate), "2018-04-04");
        assert_eq!(record.field(Column::Link), "http://www.chinaacc.com/fagui/a.shtml");
    }
}
