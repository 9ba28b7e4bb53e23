//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a paginated regulation listing and
//! write real spreadsheets into temporary directories.

use regcat::config::Config;
use regcat::crawler::{Coordinator, SearchFilter, StopReason, UpdateRequest};
use regcat::storage::{DatasetStore, XlsxStore};
use regcat::{CatalogRecord, Dataset, RegcatError};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/fagui/search.shtm";

const DIRECTORY_PAGE: &str = r#"<html><body>
    <div id="category"><span id="12">增值税</span><span id="15">企业所得税</span></div>
    <div id="area"><span id="110000">北京</span></div>
    </body></html>"#;

/// Creates a test configuration pointing at the mock server, without pauses
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.search_url = format!("{}{}", base_url, SEARCH_PATH);
    config.crawler.page_delay_min_ms = 0;
    config.crawler.page_delay_max_ms = 0;
    config.fetch.max_retries = 1;
    config.fetch.retry_delay_min_ms = 0;
    config.fetch.retry_delay_max_ms = 0;
    config.fetch.timeout_secs = 5;
    config
}

struct Entry {
    title: &'static str,
    org: Option<&'static str>,
    number: Option<&'static str>,
    date: &'static str,
}

fn entry(title: &'static str, date: &'static str) -> Entry {
    Entry {
        title,
        org: Some("国家税务总局"),
        number: None,
        date,
    }
}

/// Listing page in the site's markup
fn listing_page(entries: &[Entry], next: Option<u32>) -> String {
    let mut items = String::new();
    for e in entries {
        let mut meta = String::new();
        if let Some(org) = e.org {
            meta.push_str(&format!("<span>发文单位：{}</span>", org));
        }
        if let Some(number) = e.number {
            meta.push_str(&format!("<span>文号：{}</span>", number));
        }
        meta.push_str(&format!("<span>发文日期：{}</span>", e.date));
        items.push_str(&format!(
            r#"<div class="nr clearfix"><a href="/fagui/{0}.shtml" title="{0}">{0}</a><div class="c">{1}</div></div>"#,
            e.title, meta
        ));
    }

    let pager = match next {
        Some(page) => format!(
            r#"<a href="{0}?page=1&amp;category=12">1</a><a href="{0}?page={1}&amp;category=12">{1}</a><a href="{0}?page={1}&amp;category=12">下一页</a>"#,
            SEARCH_PATH, page
        ),
        None => format!(r#"<a href="{}?page=1&amp;category=12">1</a>"#, SEARCH_PATH),
    };

    format!(
        r#"<html><head><meta charset="utf-8"></head><body>
        <div class="lhnr clearfix">{}</div>
        <div class="fy clearfix msf">{}</div>
        </body></html>"#,
        items, pager
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

/// Serves the filter directory for any search request no page mock claimed
///
/// Mount after the page mocks: the first mounted match wins.
async fn mount_directory(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(html(DIRECTORY_PAGE.to_string()))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", page.to_string()))
        .and(query_param("category", "12"))
        .respond_with(html(body))
        .mount(server)
        .await;
}

fn titles(dataset: &Dataset) -> Vec<&str> {
    dataset.records.iter().map(|r| r.title.as_str()).collect()
}

fn record(base_url: &str, title: &str, org: &str, date: &str) -> CatalogRecord {
    CatalogRecord {
        title: title.to_string(),
        issuing_org: org.to_string(),
        doc_number: String::new(),
        issue_date: date.into(),
        link: format!("{}/fagui/{}.shtml", base_url, title),
    }
}

#[tokio::test]
async fn test_full_crawl_writes_spreadsheet() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        1,
        listing_page(
            &[
                entry("关于C的公告", "2024-01-12"),
                Entry {
                    title: "关于B的公告",
                    org: None,
                    number: Some("公告2024年第2号"),
                    date: "2024-01-11",
                },
            ],
            Some(2),
        ),
    )
    .await;
    mount_page(
        &server,
        2,
        listing_page(
            &[
                Entry {
                    title: "关于B的公告",
                    org: None,
                    number: Some("公告2024年第2号"),
                    date: "2024-01-11",
                },
                entry("关于A的公告", "2024-01-10"),
            ],
            None,
        ),
    )
    .await;
    mount_directory(&server).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("增值税-全部.xlsx");
    let config = create_test_config(&base_url);
    let mut coordinator = Coordinator::from_config(config).expect("Failed to create coordinator");

    let report = coordinator
        .crawl_all(&SearchFilter::category_only("增值税"), Some(output.clone()))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.records_fetched, 4);
    assert_eq!(report.records_written, 3);
    assert_eq!(report.stop_reason, StopReason::Exhausted);

    let dataset = XlsxStore::new("法规列表").load(&output).unwrap();
    assert_eq!(titles(&dataset), vec!["关于C的公告", "关于B的公告", "关于A的公告"]);

    let b = &dataset.records[1];
    assert_eq!(b.issuing_org, "");
    assert_eq!(b.doc_number, "公告2024年第2号");
    assert_eq!(b.issue_date.as_str(), "2024-01-11");
    let expected_link = Url::parse(&base_url)
        .unwrap()
        .join("/fagui/关于B的公告.shtml")
        .unwrap();
    assert_eq!(b.link, expected_link.as_str());
}

#[tokio::test]
async fn test_update_merges_and_is_idempotent() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        1,
        listing_page(&[entry("D", "2024-01-12"), entry("C", "2024-01-11")], Some(2)),
    )
    .await;
    mount_page(
        &server,
        2,
        listing_page(
            &[entry("B", "2024-01-10"), entry("A", "2024-01-10"), entry("Z", "2023-12-01")],
            Some(3),
        ),
    )
    .await;
    // Never reached: page 2 already falls below the watermark
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "3"))
        .respond_with(html(listing_page(&[entry("Y", "2023-11-01")], None)))
        .expect(0)
        .mount(&server)
        .await;
    mount_directory(&server).await;

    let dir = TempDir::new().unwrap();
    let dataset_path = dir.path().join("增值税-全部.xlsx");
    let store = XlsxStore::new("法规列表");
    store
        .save(
            Dataset::new(vec![
                record(&base_url, "B", "旧单位", "2024-01-10"),
                record(&base_url, "A", "国家税务总局", "2024-01-10"),
                record(&base_url, "Z", "国家税务总局", "2023-12-01"),
            ]),
            &dataset_path,
        )
        .unwrap();

    let request = UpdateRequest {
        category: "增值税".to_string(),
        dataset_path: dataset_path.clone(),
        save_path: None,
    };
    let mut coordinator =
        Coordinator::from_config(create_test_config(&base_url)).expect("Failed to create coordinator");

    let first = coordinator.update(&request).await.expect("First update failed");
    let after_first = store.load(&dataset_path).unwrap();

    assert_eq!(first.stop_reason, StopReason::Condition);
    assert_eq!(first.records_added, 2);
    assert_eq!(titles(&after_first), vec!["D", "C", "B", "A", "Z"]);
    assert_eq!(after_first.records[2].issuing_org, "国家税务总局");

    let second = coordinator.update(&request).await.expect("Second update failed");
    let after_second = store.load(&dataset_path).unwrap();

    assert_eq!(second.records_added, 0);
    assert_eq!(after_second, after_first);
}

#[tokio::test]
async fn test_update_refuses_other_category() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .respond_with(html(DIRECTORY_PAGE.to_string()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let dataset_path = dir.path().join("企业所得税-全部.xlsx");
    let store = XlsxStore::new("法规列表");
    let original = Dataset::new(vec![record(&base_url, "A", "财政部", "2024-01-10")]);
    store.save(original.clone(), &dataset_path).unwrap();

    let mut coordinator =
        Coordinator::from_config(create_test_config(&base_url)).expect("Failed to create coordinator");
    let result = coordinator
        .update(&UpdateRequest {
            category: "增值税".to_string(),
            dataset_path: dataset_path.clone(),
            save_path: Some(dir.path().join("增值税-新.xlsx")),
        })
        .await;

    assert!(matches!(result, Err(RegcatError::IdentityMismatch { .. })));
    assert_eq!(store.load(&dataset_path).unwrap(), original);
    assert!(!dir.path().join("增值税-新.xlsx").exists());
}

#[tokio::test]
async fn test_transport_failure_aborts_without_writing() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, 1, listing_page(&[entry("N", "2024-03-01")], Some(2))).await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&server)
        .await;
    mount_directory(&server).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("增值税-全部.xlsx");
    let mut coordinator =
        Coordinator::from_config(create_test_config(&base_url)).expect("Failed to create coordinator");

    let result = coordinator
        .crawl_all(&SearchFilter::category_only("增值税"), Some(output.clone()))
        .await;

    assert!(matches!(
        result,
        Err(RegcatError::FetchExhausted { attempts: 2, .. })
    ));
    assert!(!output.exists());
}
