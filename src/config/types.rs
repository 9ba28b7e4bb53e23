use serde::Deserialize;

/// Main configuration structure for Regcat
///
/// Every section falls back to its defaults, so an empty file (or no file
/// at all) yields a configuration targeting the chinaacc.com regulation
/// search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub markup: MarkupConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Site entry point and dataset naming
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Paginated search page; also serves the category/region directory
    #[serde(rename = "search-url")]
    pub search_url: String,

    /// Worksheet holding the catalog in dataset files
    #[serde(rename = "sheet-name")]
    pub sheet_name: String,

    /// Label used in file names when no year filter is given
    #[serde(rename = "all-years-label")]
    pub all_years_label: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            search_url: "http://www.chinaacc.com/fagui/search.shtm".to_string(),
            sheet_name: "法规列表".to_string(),
            all_years_label: "全部".to_string(),
        }
    }
}

/// Selectors and labels describing the listing markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Container wrapping all results of a page
    #[serde(rename = "results-selector")]
    pub results_selector: String,

    /// One result inside the container
    #[serde(rename = "item-selector")]
    pub item_selector: String,

    /// Metadata block inside a result (issuing body, number, date)
    #[serde(rename = "meta-selector")]
    pub meta_selector: String,

    /// Anchors of the pagination control
    #[serde(rename = "pager-selector")]
    pub pager_selector: String,

    /// Exact anchor text of the "next page" control
    #[serde(rename = "next-label")]
    pub next_label: String,

    /// Directory block listing category names and ids
    #[serde(rename = "category-selector")]
    pub category_selector: String,

    /// Directory block listing region names and ids
    #[serde(rename = "region-selector")]
    pub region_selector: String,

    #[serde(rename = "org-label")]
    pub org_label: String,

    #[serde(rename = "number-label")]
    pub number_label: String,

    #[serde(rename = "date-label")]
    pub date_label: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            results_selector: ".lhnr.clearfix".to_string(),
            item_selector: ".nr.clearfix".to_string(),
            meta_selector: ".c".to_string(),
            pager_selector: ".fy.clearfix.msf a".to_string(),
            next_label: "下一页".to_string(),
            category_selector: "div#category".to_string(),
            region_selector: "div#area".to_string(),
            org_label: "发文单位".to_string(),
            number_label: "文号".to_string(),
            date_label: "发文日期".to_string(),
        }
    }
}

/// Page walk behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Lower bound of the randomized pause between pages (milliseconds)
    #[serde(rename = "page-delay-min-ms")]
    pub page_delay_min_ms: u64,

    /// Upper bound of the randomized pause between pages (milliseconds)
    #[serde(rename = "page-delay-max-ms")]
    pub page_delay_max_ms: u64,

    /// Hard ceiling on pages fetched by a single walk
    #[serde(rename = "max-pages")]
    pub max_pages: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_delay_min_ms: 3000,
            page_delay_max_ms: 6000,
            max_pages: 1000,
        }
    }
}

/// HTTP transport behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Additional attempts after the first failed one
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    #[serde(rename = "retry-delay-min-ms")]
    pub retry_delay_min_ms: u64,

    #[serde(rename = "retry-delay-max-ms")]
    pub retry_delay_max_ms: u64,

    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Encoding used when the response does not declare one
    pub charset: String,

    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_min_ms: 6000,
            retry_delay_max_ms: 10000,
            timeout_secs: 30,
            charset: "utf-8".to_string(),
            user_agent: concat!("regcat/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
