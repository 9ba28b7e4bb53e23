use crate::RegcatError;
use std::path::Path;

/// Refuses to pair a category with a dataset file not named after it
///
/// Dataset files carry their category in the file name (for example
/// `增值税-全部.xlsx`), so the category text must appear in it.
pub fn ensure_same_category(category: &str, dataset_path: &Path) -> Result<(), RegcatError> {
    let file_name = dataset_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let category = category.trim();

    if category.is_empty() || !file_name.contains(category) {
        return Err(RegcatError::IdentityMismatch {
            category: category.to_string(),
            dataset: dataset_path.display().to_string(),
        });
    }

    Ok(())
}
