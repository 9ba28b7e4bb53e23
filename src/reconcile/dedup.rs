use crate::catalog::CatalogRecord;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Keeps the first record for every key, preserving order
pub(crate) fn keep_first_by<K, F>(records: Vec<CatalogRecord>, mut key: F) -> Vec<CatalogRecord>
where
    K: Hash + Eq,
    F: FnMut(&CatalogRecord) -> K,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(key(record)))
        .collect()
}

/// Keeps the last occurrence of every fully identical record, at its
/// last position
pub(crate) fn keep_last(records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    let mut last_index: HashMap<&CatalogRecord, usize> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        last_index.insert(record, index);
    }
    let keep: Vec<bool> = records
        .iter()
        .enumerate()
        .map(|(index, record)| last_index[record] == index)
        .collect();

    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, org: &str) -> CatalogRecord {
        CatalogRecord {
            title: title.to_string(),
            issuing_org: org.to_string(),
            ..CatalogRecord::default()
        }
    }

    #[test]
    fn test_keep_first_by_title() {
        let records = vec![record("A", "1"), record("B", "1"), record("A", "2")];
        let kept = keep_first_by(records, |r| r.title.clone());
        assert_eq!(kept, vec![record("A", "1"), record("B", "1")]);
    }

    #[test]
    fn test_keep_last_full_equality() {
        let records = vec![
            record("A", "1"),
            record("B", "1"),
            record("A", "1"),
            record("A", "2"),
        ];
        let kept = keep_last(records);
        assert_eq!(kept, vec![record("B", "1"), record("A", "1"), record("A", "2")]);
    }
}
