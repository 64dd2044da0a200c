//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for the lesson portal and exercise
//! login, pagination and output end-to-end.

use lesson_harvest::config::{Config, Credentials};
use lesson_harvest::crawler::{crawl, Session};
use lesson_harvest::output::{write_records, OutputFormat};
use lesson_harvest::{DetailKey, DetailValue, HarvestError, ParseError};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PAGE: &str = r#"<html><body>
<form action="/auth/login" method="post">
  <input type="hidden" name="_token" value="tok123">
  <input type="text" name="username">
  <input type="password" name="password">
  <input type="submit" value="Login">
</form>
</body></html>"#;

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.portal.base_url = base_url.to_string();
    config.crawler.crawl_interval_ms = 10; // Very short for testing
    config
}

fn credentials() -> Credentials {
    Credentials {
        id: "learner".to_string(),
        password: "secret".to_string(),
    }
}

fn html_response(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.into())
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn lesson_block(time: &str, lesson_no: u32, instructor: &str, details: &[&str]) -> String {
    let items: String = details.iter().map(|d| format!("<li>{}</li>", d)).collect();
    format!(
        r#"<div class="lessonRecord">
  <div class="lessonRecordHeader"><h2>{}</h2><label>Lesson No.{}</label></div>
  <div class="instructor"><span class="instructorName">{}</span></div>
  <ul class="details">{}</ul>
</div>"#,
        time, lesson_no, instructor, items
    )
}

fn history_page(blocks: &[String], next: Option<&str>) -> String {
    let pager = next
        .map(|href| format!(r#"<ul class="pagination"><li><a href="{}">»</a></li></ul>"#, href))
        .unwrap_or_else(|| r#"<ul class="pagination"><li><a href="/lesson/lessonrecords/page/1">«</a></li></ul>"#.to_string());
    format!("<html><body>{}{}</body></html>", blocks.concat(), pager)
}

/// Mounts a login page plus a POST handler that lands on `landing`
async fn mount_login(mock_server: &MockServer, landing: &str) {
    Mock::given(method("GET"))
        .and(path("/auth/login"))
        .respond_with(html_response(LOGIN_PAGE))
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_string_contains("_token=tok123"))
        .and(body_string_contains("username=learner"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", landing))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(html_response("<html><body>Welcome</body></html>"))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_two_pages() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "/home").await;

    Mock::given(method("GET"))
        .and(path("/lesson/lessonrecords/page/1"))
        .respond_with(html_response(history_page(
            &[
                lesson_block(
                    "2016年03月11日(金) 19:00",
                    3,
                    "Alice",
                    &["教材:Business  English", "単語: dog | cat |bird", "フレーズ:See you"],
                ),
                lesson_block("2016年03月04日(金) 19:00", 2, "Bob", &["発音:とても  きれい"]),
            ],
            Some("/lesson/lessonrecords/page/2"),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/lesson/lessonrecords/page/2"))
        .respond_with(html_response(history_page(
            &[lesson_block("2016年02月26日(金) 19:00", 1, "", &["単語:apple"])],
            None,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let records = crawl(&config, &credentials()).await.expect("Crawl failed");

    assert_eq!(records.len(), 3);
    let numbers: Vec<_> = records.iter().map(|r| r.lesson_no).collect();
    assert_eq!(numbers, vec![Some(3), Some(2), Some(1)]);

    assert_eq!(records[0].instructor_name, "Alice");
    assert_eq!(records[0].lesson_time.to_rfc3339(), "2016-03-11T19:00:00+09:00");
    assert_eq!(
        records[0].detail(DetailKey::Textbook),
        Some(&DetailValue::Text("Business English".to_string()))
    );
    assert_eq!(records[0].words(), ["dog", "cat", "bird"]);
    assert_eq!(records[0].phrases(), ["See you"]);
    assert_eq!(
        records[1].detail(DetailKey::Pronunciation),
        Some(&DetailValue::Text("とても きれい".to_string()))
    );
    assert_eq!(records[2].instructor_name, "");

    let mut out = Vec::new();
    write_records(OutputFormat::Tsv, &records, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "id\tlesson_no\ttype\tword_or_phrase\n\
         0\t1\tword\tapple\n\
         1\t3\tword\tdog\n\
         2\t3\tword\tcat\n\
         3\t3\tword\tbird\n\
         4\t3\tphrase\tSee you\n"
    );
}

#[tokio::test]
async fn test_login_lands_on_home() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "/home").await;

    let config = create_test_config(&mock_server.uri());
    let session = Session::login(&config, &credentials())
        .await
        .expect("Login failed");

    assert_eq!(session.home_url().path(), "/home");
}

#[tokio::test]
async fn test_login_rejected() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "/auth/login?error=1").await;

    Mock::given(method("GET"))
        .and(path("/lesson/lessonrecords/page/1"))
        .respond_with(html_response(history_page(&[], None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let err = crawl(&config, &credentials()).await.unwrap_err();

    match err {
        HarvestError::Authentication { user } => assert_eq!(user, "learner"),
        other => panic!("Expected authentication error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_page_without_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/login"))
        .respond_with(html_response("<html><body>Maintenance</body></html>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let err = crawl(&config, &credentials()).await.unwrap_err();

    assert!(matches!(err, HarvestError::MissingForm { .. }));
}

#[tokio::test]
async fn test_unknown_label_aborts_crawl() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "/home").await;

    Mock::given(method("GET"))
        .and(path("/lesson/lessonrecords/page/1"))
        .respond_with(html_response(history_page(
            &[lesson_block("2016/03/04 19:00", 2, "Alice", &["宿題:page 10"])],
            Some("/lesson/lessonrecords/page/2"),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/lesson/lessonrecords/page/2"))
        .respond_with(html_response(history_page(&[], None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let err = crawl(&config, &credentials()).await.unwrap_err();

    match err {
        HarvestError::Parse(ParseError::UnknownLabel { label, raw }) => {
            assert_eq!(label, "宿題");
            assert_eq!(raw, "宿題:page 10");
        }
        other => panic!("Expected unknown label error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_aborts_crawl() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "/home").await;

    Mock::given(method("GET"))
        .and(path("/lesson/lessonrecords/page/1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let err = crawl(&config, &credentials()).await.unwrap_err();

    assert!(matches!(err, HarvestError::HttpStatus { status: 503, .. }));
}
