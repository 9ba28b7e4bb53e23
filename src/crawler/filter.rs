//! Search filters and the site's filter directory
//!
//! The search page lists every category and region as a `span` whose `id`
//! is the value the search expects. A [`SearchFilter`] names them in plain
//! text; the [`FilterDirectory`] translates names into ids. A name the
//! directory does not list is an error: dropping it from the query would
//! widen the search to every category or region.

use crate::config::MarkupConfig;
use crate::{ConfigError, RegcatError};
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Name to id mappings read from the search page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDirectory {
    pub categories: HashMap<String, String>,
    pub regions: HashMap<String, String>,
}

impl FilterDirectory {
    /// Id for a category name, if listed
    pub fn category_id(&self, name: &str) -> Option<&str> {
        self.categories.get(name.trim()).map(String::as_str)
    }

    /// Id for a region name, if listed
    pub fn region_id(&self, name: &str) -> Option<&str> {
        self.regions.get(name.trim()).map(String::as_str)
    }
}

/// Parses the category and region directories out of the search page
pub fn parse_filter_directory(
    html: &str,
    markup: &MarkupConfig,
) -> Result<FilterDirectory, ConfigError> {
    let document = Html::parse_document(html);
    Ok(FilterDirectory {
        categories: read_directory(&document, &markup.category_selector)?,
        regions: read_directory(&document, &markup.region_selector)?,
    })
}

fn read_directory(document: &Html, container: &str) -> Result<HashMap<String, String>, ConfigError> {
    let container_selector = Selector::parse(container)
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", container, e)))?;
    let span_selector = Selector::parse("span[id]")
        .map_err(|e| ConfigError::InvalidSelector(format!("'span[id]': {:?}", e)))?;

    let mut entries = HashMap::new();
    let Some(block) = document.select(&container_selector).next() else {
        tracing::warn!("Filter directory '{}' not found on search page", container);
        return Ok(entries);
    };

    for span in block.select(&span_selector) {
        let name = span.text().collect::<String>().trim().to_string();
        let id = span.value().attr("id").unwrap_or_default().trim();
        if !name.is_empty() && !id.is_empty() {
            entries.insert(name, id.to_string());
        }
    }

    Ok(entries)
}

/// Category, region and year restricting a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub category: String,
    pub region: Option<String>,
    pub year: Option<String>,
}

impl SearchFilter {
    /// Builds a filter; blank region or year count as absent
    pub fn new(category: &str, region: Option<&str>, year: Option<&str>) -> Self {
        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            category: category.trim().to_string(),
            region: present(region),
            year: present(year),
        }
    }

    /// Filter used by updates: the category alone
    pub fn category_only(category: &str) -> Self {
        Self::new(category, None, None)
    }

    /// Whether building the start URL needs the filter directory
    pub fn needs_directory(&self) -> bool {
        !self.category.is_empty() || self.region.is_some()
    }

    /// First page of the filtered search
    ///
    /// # Returns
    ///
    /// * `Ok(Url)` - `search_url?page=1` plus the mapped filter parameters
    /// * `Err(RegcatError)` - The category or region is not in the directory
    pub fn start_url(
        &self,
        search_url: &Url,
        directory: &FilterDirectory,
    ) -> Result<Url, RegcatError> {
        let category = if self.category.is_empty() {
            None
        } else {
            let id = directory
                .category_id(&self.category)
                .ok_or_else(|| RegcatError::UnknownCategory(self.category.clone()))?;
            Some(id)
        };

        let region = match &self.region {
            Some(region) => Some(
                directory
                    .region_id(region)
                    .ok_or_else(|| RegcatError::UnknownRegion(region.clone()))?,
            ),
            None => None,
        };

        let mut url = search_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", "1");
            if let Some(id) = category {
                query.append_pair("category", id);
            }
            if let Some(id) = region {
                query.append_pair("area", id);
            }
            if let Some(year) = &self.year {
                query.append_pair("time", year);
            }
        }
        Ok(url)
    }

    /// Default file name for a full crawl: `<category><region>-<year or all>.xlsx`
    pub fn file_name(&self, all_years_label: &str) -> String {
        format!(
            "{}{}-{}.xlsx",
            self.category,
            self.region.as_deref().unwrap_or(""),
            self.year.as_deref().unwrap_or(all_years_label)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"<html><body>
        <div id="category"><span id="12">增值税</span><span id="15">企业所得税</span><span>无编号</span></div>
        <div id="area"><span id="110000">北京</span><span id="310000"> 上海 </span></div>
        </body></html>"#;

    fn search_url() -> Url {
        Url::parse("http://www.chinaacc.com/fagui/search.shtm").unwrap()
    }

    #[test]
    fn test_parse_filter_directory() {
        let directory = parse_filter_directory(SEARCH_PAGE, &MarkupConfig::default()).unwrap();

        assert_eq!(directory.categories.len(), 2);
        assert_eq!(directory.category_id("增值税"), Some("12"));
        assert_eq!(directory.region_id("上海"), Some("310000"));
        assert_eq!(directory.category_id("无编号"), None);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let directory =
            parse_filter_directory("<html><body></body></html>", &MarkupConfig::default())
                .unwrap();
        assert_eq!(directory, FilterDirectory::default());
    }

    #[test]
    fn test_start_url_with_all_parts() {
        let directory = parse_filter_directory(SEARCH_PAGE, &MarkupConfig::default()).unwrap();
        let filter = SearchFilter::new("增值税", Some("北京"), Some("2023"));

        assert_eq!(
            filter.start_url(&search_url(), &directory).unwrap().as_str(),
            "http://www.chinaacc.com/fagui/search.shtm?page=1&category=12&area=110000&time=2023"
        );
    }

    #[test]
    fn test_start_url_rejects_unlisted_category() {
        let directory = parse_filter_directory(SEARCH_PAGE, &MarkupConfig::default()).unwrap();
        let filter = SearchFilter::category_only("消费税");

        assert!(matches!(
            filter.start_url(&search_url(), &directory),
            Err(RegcatError::UnknownCategory(name)) if name == "消费税"
        ));
    }

    #[test]
    fn test_start_url_rejects_unlisted_region() {
        let directory = parse_filter_directory(SEARCH_PAGE, &MarkupConfig::default()).unwrap();
        let filter = SearchFilter::new("增值税", Some("火星"), None);

        assert!(matches!(
            filter.start_url(&search_url(), &directory),
            Err(RegcatError::UnknownRegion(name)) if name == "火星"
        ));
    }

    #[test]
    fn test_start_url_without_names() {
        let filter = SearchFilter::new("", None, Some("2020"));

        assert_eq!(
            filter
                .start_url(&search_url(), &FilterDirectory::default())
                .unwrap()
                .as_str(),
            "http://www.chinaacc.com/fagui/search.shtm?page=1&time=2020"
        );
    }

    #[test]
    fn test_blank_parts_are_absent() {
        let filter = SearchFilter::new(" 增值税 ", Some("  "), Some(""));
        assert_eq!(filter, SearchFilter::category_only("增值税"));
        assert!(filter.needs_directory());
        assert!(!SearchFilter::new("", None, Some("2020")).needs_directory());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            SearchFilter::new("增值税", Some("北京"), Some("2023")).file_name("全部"),
            "增值税北京-2023.xlsx"
        );
        assert_eq!(
            SearchFilter::category_only("增值税").file_name("全部"),
            "增值税-全部.xlsx"
        );
    }
}
