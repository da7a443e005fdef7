//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! fetch, extract, enqueue and flush cycle end-to-end.

use contact_crawler::config::Config;
use contact_crawler::crawler::Coordinator;
use contact_crawler::state::{CrawlPhase, StopReason};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const HEADING: &str = r#"class="text-center color-dark text-uppercase""#;

/// Creates a test configuration writing to a CSV file inside `dir`
fn create_test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.crawler.delay_ms = 0;
    config.crawler.request_timeout_secs = 5;
    config.output.csv_path = dir
        .path()
        .join("collected_data.csv")
        .to_string_lossy()
        .into_owned();
    config
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

fn seed_of(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("Failed to parse mock server URI")
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to open CSV output");
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

/// Mounts an endless chain: /page/N links to /page/N+1 and back to the seed
async fn mount_endless_chain(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(|req: &Request| {
            let n: u64 = req
                .url
                .path()
                .trim_start_matches("/page/")
                .parse()
                .unwrap_or(0);
            html_page(&format!(
                r#"<h1 {}>Firm {}</h1>
                <p>Mail: firm{}@chain.test</p>
                <p>Phone: +7 495 000 00 {:02}</p>
                <a href="/">Home</a>
                <a href="/page/{}">Next</a>"#,
                HEADING,
                n,
                n,
                n % 100,
                n + 1
            ))
        })
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_scenario_a_records_and_scoped_links() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<h1 {}>Acme</h1>
            <p>Write to a@x.test or b@x.test</p>
            <p>Phone: +1 555 123 4567</p>
            <a href="{}/about">About</a>
            <a href="http://other.test/">Other</a>"#,
            HEADING,
            server.uri()
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("<p>About us</p>"))
        .mount(&server)
        .await;

    let config = create_test_config(&dir);
    let csv_path = dir.path().join("collected_data.csv");
    let seed = seed_of(&server);

    let mut coordinator =
        Coordinator::new(config, seed.clone()).expect("Failed to create coordinator");
    let summary = coordinator
        .run(CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(summary.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(summary.records_written, 2);
    assert_eq!(coordinator.phase(), CrawlPhase::Done);

    // Only the in-scope link was followed
    assert_eq!(requested_paths(&server).await, vec!["/", "/about"]);
    assert!(coordinator
        .frontier()
        .is_visited(&seed.join("/about").unwrap()));
    assert_eq!(coordinator.frontier().visited_len(), 2);

    let rows = read_rows(&csv_path);
    assert_eq!(
        rows,
        vec![
            vec!["Company Name", "Phone Number", "Email"],
            vec!["Acme", "+1 555 123 4567", "a@x.test"],
            vec!["Acme", "+1 555 123 4567", "b@x.test"],
        ]
    );
}

#[tokio::test]
async fn test_scenario_b_no_heading_still_follows_links() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<h1>Directory</h1>
            <p>info@x.test +1 555 000 1111</p>
            <a href="/firm">Firm</a>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/firm"))
        .respond_with(html_page("<p>Nothing here</p>"))
        .mount(&server)
        .await;

    let config = create_test_config(&dir);
    let mut coordinator = Coordinator::new(config, seed_of(&server)).unwrap();
    let summary = coordinator.run(CancellationToken::new()).await.unwrap();

    assert_eq!(summary.records_written, 0);
    assert_eq!(summary.statistics.pages_visited, 2);
    assert_eq!(summary.statistics.pages_with_name, 0);
    assert_eq!(requested_paths(&server).await, vec!["/", "/firm"]);
    assert_eq!(read_rows(&dir.path().join("collected_data.csv")).len(), 1);
}

#[tokio::test]
async fn test_scenario_c_seed_fetch_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = create_test_config(&dir);
    let mut coordinator = Coordinator::new(config, seed_of(&server)).unwrap();
    let summary = coordinator.run(CancellationToken::new()).await.unwrap();

    assert_eq!(summary.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(summary.records_written, 0);
    assert_eq!(summary.statistics.fetch_failures, 1);
    assert_eq!(summary.statistics.links_enqueued, 0);

    let content = std::fs::read_to_string(dir.path().join("collected_data.csv")).unwrap();
    assert_eq!(content, "Company Name,Phone Number,Email\n");
}

#[tokio::test]
async fn test_scenario_c_unreachable_seed() {
    let dir = TempDir::new().unwrap();

    // Bind and drop a listener to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let seed = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();
    let mut coordinator = Coordinator::new(create_test_config(&dir), seed).unwrap();
    let summary = coordinator.run(CancellationToken::new()).await.unwrap();

    assert_eq!(summary.records_written, 0);
    assert_eq!(summary.statistics.fetch_failures, 1);
    assert_eq!(read_rows(&dir.path().join("collected_data.csv")).len(), 1);
}

#[tokio::test]
async fn test_scenario_d_page_limit() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_endless_chain(&server).await;

    let mut config = create_test_config(&dir);
    config.crawler.max_pages = 3;

    let mut coordinator = Coordinator::new(config, seed_of(&server)).unwrap();
    let summary = coordinator.run(CancellationToken::new()).await.unwrap();

    assert_eq!(summary.stop_reason, StopReason::PageLimit);
    assert_eq!(coordinator.frontier().visited_len(), 3);
    assert!(!coordinator.frontier().is_empty());
    assert_eq!(requested_paths(&server).await.len(), 3);

    // One record per page, header included
    assert_eq!(summary.records_written, 3);
    assert_eq!(read_rows(&dir.path().join("collected_data.csv")).len(), 4);
}

#[tokio::test]
async fn test_each_url_processed_once() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // Every page links to every other page, including itself
    let links = r#"<a href="/">Home</a><a href="/a">A</a><a href="/b">B</a>
        <a href="/a">A again</a><a href="b">B relative</a>"#;
    for p in ["/", "/a", "/b"] {
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(html_page(links))
            .mount(&server)
            .await;
    }

    let config = create_test_config(&dir);
    let mut coordinator = Coordinator::new(config, seed_of(&server)).unwrap();
    let summary = coordinator.run(CancellationToken::new()).await.unwrap();

    let paths = requested_paths(&server).await;
    let unique: HashSet<&String> = paths.iter().collect();
    assert_eq!(paths.len(), unique.len());
    assert_eq!(paths, vec!["/", "/a", "/b"]);
    assert_eq!(summary.statistics.links_enqueued, 2);
}

#[tokio::test]
async fn test_records_flushed_in_crawl_order() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_endless_chain(&server).await;

    let mut config = create_test_config(&dir);
    config.crawler.max_pages = 4;

    let mut coordinator = Coordinator::new(config, seed_of(&server)).unwrap();
    coordinator.run(CancellationToken::new()).await.unwrap();

    let names: Vec<String> = read_rows(&dir.path().join("collected_data.csv"))
        .into_iter()
        .skip(1)
        .map(|row| row[0].clone())
        .collect();
    assert_eq!(names, vec!["Firm 0", "Firm 1", "Firm 2", "Firm 3"]);
}

#[tokio::test]
async fn test_interrupt_flushes_collected_records() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_endless_chain(&server).await;

    let mut config = create_test_config(&dir);
    config.crawler.delay_ms = 20;

    let mut coordinator = Coordinator::new(config, seed_of(&server)).unwrap();
    let records = coordinator.records();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    });

    let summary = coordinator.run(cancel).await.unwrap();

    assert_eq!(summary.stop_reason, StopReason::Interrupted);
    assert!(summary.records_written > 0);
    assert_eq!(summary.records_written, records.len());

    let rows = read_rows(&dir.path().join("collected_data.csv"));
    assert_eq!(rows.len(), summary.records_written + 1);
    assert_eq!(rows[0], vec!["Company Name", "Phone Number", "Email"]);
}

#[tokio::test]
async fn test_unwritable_output_is_an_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(html_page("<p>empty</p>"))
        .mount(&server)
        .await;

    let mut config = create_test_config(&dir);
    config.output.csv_path = dir
        .path()
        .join("no-such-dir")
        .join("out.csv")
        .to_string_lossy()
        .into_owned();

    let mut coordinator = Coordinator::new(config, seed_of(&server)).unwrap();
    let result = coordinator.run(CancellationToken::new()).await;

    assert!(matches!(
        result,
        Err(contact_crawler::CrawlError::Output(_))
    ));
    assert_eq!(coordinator.phase(), CrawlPhase::Done);
}
