//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full harvest cycle end-to-end: crawl, month filter, text output.

use month_links::config::Config;
use month_links::crawler::{Coordinator, CrawlReport};
use month_links::months::MonthMatcher;
use month_links::output::{save_links, TextFileSink};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Default configuration for the mock site, without pacing
fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config::for_site(&format!("{}/", server.uri()));
    config.crawler.delay_ms = 0;
    config.crawler.timeout_secs = 5;
    config
}

async fn mount_page(server: &MockServer, page: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn crawl(config: &Config) -> CrawlReport {
    Coordinator::from_config(config)
        .expect("Failed to build coordinator")
        .run()
        .await
}

/// A links to B and C; B links to a PDF and to a dated page D
async fn mount_three_page_site(server: &MockServer) {
    mount_page(
        server,
        "/",
        r#"<html><body>
            <a href="/b">B</a>
            <a href="/c">C</a>
        </body></html>"#,
    )
    .await;

    mount_page(
        server,
        "/b",
        r#"<html><body>
            <a href="/files/report.pdf">Report</a>
            <a href="/2023/02/d">February</a>
            <a href="/">Home</a>
        </body></html>"#,
    )
    .await;

    mount_page(server, "/c", "<html><body>No links here</body></html>").await;
    mount_page(server, "/2023/02/d", "<html><body>Dated</body></html>").await;

    Mock::given(method("GET"))
        .and(path("/files/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_string("%PDF-1.4"))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    mount_three_page_site(&mock_server).await;

    let config = create_test_config(&mock_server);
    let report = crawl(&config).await;

    assert!(!report.interrupted);
    assert_eq!(report.pages_visited, 4);
    assert_eq!(report.pages_failed, 0);
    assert_eq!(report.attempts, 4);

    let base = mock_server.uri();
    let discovered = report.discovered_sorted();
    assert!(discovered.contains(&format!("{}/files/report.pdf", base)));
    assert!(discovered.contains(&format!("{}/2023/02/d", base)));
    assert!(discovered.contains(&format!("{}/b", base)));
    assert!(discovered.contains(&format!("{}/c", base)));

    let matcher = MonthMatcher::with_default_months().unwrap();
    let result = matcher.apply(discovered);
    assert_eq!(result.links, vec![format!("{}/2023/02/d", base)]);
    assert_eq!(result.statistics.get("février"), Some(1));
    assert_eq!(result.statistics.total(), 1);

    // Mock expectations (each page once, PDF never) are verified on drop
}

#[tokio::test]
async fn test_failed_pages_do_not_abort_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Gone</a>
           <a href="/broken">Broken</a>
           <a href="/janvier">Janvier</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/janvier", "<p>Archive</p>").await;

    let config = create_test_config(&mock_server);
    let report = crawl(&config).await;

    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.pages_failed, 2);
    assert_eq!(report.attempts, 4);
    assert_eq!(report.discovered.len(), 3);
}

#[tokio::test]
async fn test_transient_errors_retried_when_configured() {
    let mock_server = MockServer::start().await;

    // Mounted first, so it answers the first request only
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/", r#"<a href="/mars">Mars</a>"#).await;
    mount_page(&mock_server, "/mars", "<p>Mars</p>").await;

    let mut config = create_test_config(&mock_server);
    config.crawler.max_retries = 2;
    config.crawler.retry_delay_ms = 10;

    let report = crawl(&config).await;

    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.pages_failed, 0);
    assert_eq!(report.attempts, 2);
}

#[tokio::test]
async fn test_other_hosts_not_followed() {
    let mock_server = MockServer::start().await;
    let port = url::Url::parse(&mock_server.uri())
        .unwrap()
        .port()
        .expect("mock server has a port");

    // Same server under another host name counts as a different domain
    mount_page(
        &mock_server,
        "/",
        &format!(r#"<a href="http://localhost:{}/external">Out</a>"#, port),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/external"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let report = crawl(&config).await;

    assert_eq!(report.pages_visited, 1);
    assert!(report.discovered.is_empty());
}

#[tokio::test]
async fn test_interrupted_crawl_keeps_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="/b">B</a>"#))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let report = Coordinator::from_config(&config)
        .unwrap()
        .run_until(std::future::ready(()))
        .await;

    assert!(report.interrupted);
    assert_eq!(report.pages_visited, 0);
    assert!(report.discovered.is_empty());
}

#[tokio::test]
async fn test_end_to_end_writes_filtered_links() {
    let mock_server = MockServer::start().await;
    mount_three_page_site(&mock_server).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("liens_filtres.txt");

    let mut config = create_test_config(&mock_server);
    config.output.path = output.to_string_lossy().into_owned();

    let report = crawl(&config).await;
    let matcher = MonthMatcher::with_default_months().unwrap();
    let result = matcher.apply(report.discovered_sorted());

    let written = save_links(&TextFileSink::new(&config.output.path), &result).unwrap();
    assert_eq!(written, 1);

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content, format!("{}/2023/02/d\n", mock_server.uri()));
}
