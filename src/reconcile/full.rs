use crate::catalog::{CatalogRecord, Dataset};
use crate::reconcile::dedup;

/// Builds a fresh dataset from a full crawl
///
/// Records keep fetch order; fully identical records collapse to their
/// first occurrence. Records that merely share a title are both kept.
pub fn merge_full_crawl(records: Vec<CatalogRecord>) -> Dataset {
    let fetched = records.len();
    let records = dedup::keep_first_by(records, |r| r.clone());
    if records.len() < fetched {
        tracing::debug!("Dropped {} duplicate records", fetched - records.len());
    }
    Dataset::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Column;

    fn record(title: &str, date: &str, link: &str) -> CatalogRecord {
        CatalogRecord {
            title: title.to_string(),
            issue_date: date.into(),
            link: link.to_string(),
            ..CatalogRecord::default()
        }
    }

    #[test]
    fn test_identical_records_collapse_to_first() {
        // Page one ends and page two starts with the same document
        let records = vec![
            record("C", "2024-01-12", "http://x/c"),
            record("B", "2024-01-11", "http://x/b"),
            record("B", "2024-01-11", "http://x/b"),
            record("A", "2024-01-10", "http://x/a"),
        ];

        let dataset = merge_full_crawl(records);

        let titles: Vec<&str> = dataset.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "B", "A"]);
        assert_eq!(dataset.columns, Column::CANONICAL.to_vec());
    }

    #[test]
    fn test_same_title_different_fields_are_kept() {
        let records = vec![
            record("通知", "2024-01-12", "http://x/1"),
            record("通知", "2024-01-11", "http://x/2"),
        ];

        assert_eq!(merge_full_crawl(records).len(), 2);
    }
}
