use crate::config::types::{Config, CrawlerConfig, FetchConfig, MarkupConfig, SiteConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Excel refuses worksheet names longer than this
const MAX_SHEET_NAME_CHARS: usize = 31;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_markup_config(&config.markup)?;
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.search_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "search-url must use http or https, got '{}'",
            config.search_url
        )));
    }

    let sheet_chars = config.sheet_name.chars().count();
    if sheet_chars == 0 || sheet_chars > MAX_SHEET_NAME_CHARS {
        return Err(ConfigError::Validation(format!(
            "sheet-name must be 1 to {} characters, got '{}'",
            MAX_SHEET_NAME_CHARS, config.sheet_name
        )));
    }

    if config.all_years_label.trim().is_empty() {
        return Err(ConfigError::Validation(
            "all-years-label cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_markup_config(config: &MarkupConfig) -> Result<(), ConfigError> {
    for selector in [
        &config.results_selector,
        &config.item_selector,
        &config.meta_selector,
        &config.pager_selector,
        &config.category_selector,
        &config.region_selector,
    ] {
        validate_selector(selector)?;
    }

    for (name, label) in [
        ("next-label", &config.next_label),
        ("org-label", &config.org_label),
        ("number-label", &config.number_label),
        ("date-label", &config.date_label),
    ] {
        if label.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.page_delay_min_ms > config.page_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "page-delay-min-ms ({}) exceeds page-delay-max-ms ({})",
            config.page_delay_min_ms, config.page_delay_max_ms
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.retry_delay_min_ms > config.retry_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "retry-delay-min-ms ({}) exceeds retry-delay-max-ms ({})",
            config.retry_delay_min_ms, config.retry_delay_max_ms
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.charset.trim().is_empty() {
        return Err(ConfigError::Validation("charset cannot be empty".to_string()));
    }

    Ok(())
}

/// Checks that a CSS selector compiles
pub(crate) fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}
