use std::path::{Path, PathBuf};

/// Dataset file an update reads by default: `<category>-<all label>.xlsx`
pub fn update_source_path(dir: &Path, category: &str, all_years_label: &str) -> PathBuf {
    dir.join(format!("{}-{}.xlsx", category.trim(), all_years_label))
}

/// Appends `.xlsx` to names given without an extension
pub fn with_xlsx_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".xlsx");
        PathBuf::from(name)
    }
}
