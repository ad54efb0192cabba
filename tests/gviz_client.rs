//! HTTP-level tests for `GvizClient` using wiremock.

use ad_pulse::dashboard::load_dashboard;
use ad_pulse::error::DashboardError;
use ad_pulse::fetch::BasicClient;
use ad_pulse::fetch::auth::BearerToken;
use ad_pulse::infra::gviz::GvizClient;
use ad_pulse::services::table_source::{SheetNames, TableSource};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHEET_PATH: &str = "/spreadsheets/d/sheet123/gviz/tq";

fn envelope(json: &str) -> String {
    format!("/*O_o*/\ngoogle.visualization.Query.setResponse({json});")
}

fn single_column(label: &str, value: &str) -> String {
    envelope(&format!(
        r#"{{"status":"ok","table":{{"cols":[{{"id":"A","label":"{label}","type":"string"}}],"rows":[{{"c":[{{"v":"{value}"}}]}}]}}}}"#
    ))
}

async fn mount_sheet(server: &MockServer, sheet: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .and(query_param("tqx", "out:json"))
        .and(query_param("sheet", sheet))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_all(server: &MockServer) {
    mount_sheet(server, "Accounts", 200, single_column("account_id", "act_1")).await;
    mount_sheet(server, "Account Metrics", 200, single_column("account_id", "act_1")).await;
    mount_sheet(server, "Campaign Metrics", 200, single_column("campaign_id", "c1")).await;
    mount_sheet(server, "Last Run", 200, single_column("last_run_timestamp", "2024-01-15 06:00:00")).await;
}

fn client(server: &MockServer) -> GvizClient<BasicClient> {
    GvizClient::new(BasicClient::new().unwrap(), server.uri(), "sheet123")
}

#[tokio::test]
async fn test_fetch_table_returns_rows() {
    let server = MockServer::start().await;
    mount_sheet(&server, "Account Metrics", 200, single_column("account_id", "act_9")).await;

    let rows = client(&server)
        .fetch_table("Account Metrics")
        .await
        .expect("should parse sheet");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["account_id"].as_text(), "act_9");
}

#[tokio::test]
async fn test_http_error_status_is_fetch_error() {
    let server = MockServer::start().await;
    mount_sheet(&server, "Accounts", 404, String::new()).await;

    let err = client(&server).fetch_table("Accounts").await.unwrap_err();
    assert!(matches!(err, DashboardError::Fetch(_)));
    assert_eq!(err.to_string(), "Failed to fetch sheet \"Accounts\": 404");
}

#[tokio::test]
async fn test_login_page_is_format_error() {
    let server = MockServer::start().await;
    mount_sheet(&server, "Accounts", 200, "<html>Sign in</html>".to_string()).await;

    let err = client(&server).fetch_table("Accounts").await.unwrap_err();
    assert!(matches!(err, DashboardError::Format(_)));
}

#[tokio::test]
async fn test_upstream_error_carries_detail() {
    let server = MockServer::start().await;
    let body = envelope(
        r#"{"status":"error","errors":[{"reason":"invalid_query","message":"INVALID_QUERY","detailed_message":"Invalid sheet name: Acounts"}]}"#,
    );
    mount_sheet(&server, "Acounts", 200, body).await;

    match client(&server).fetch_table("Acounts").await.unwrap_err() {
        DashboardError::Upstream { detail } => assert_eq!(detail, "Invalid sheet name: Acounts"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_load_dashboard_fetches_every_sheet() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let data = load_dashboard(&client(&server), &SheetNames::default())
        .await
        .expect("all sheets should load");

    assert_eq!(data.accounts[0].account_id, "act_1");
    assert_eq!(data.campaign_metrics[0].campaign_id.as_deref(), Some("c1"));
    assert_eq!(data.last_run.len(), 1);
}

#[tokio::test]
async fn test_one_failing_sheet_rejects_the_load() {
    let server = MockServer::start().await;
    mount_sheet(&server, "Accounts", 200, single_column("account_id", "act_1")).await;
    mount_sheet(&server, "Account Metrics", 200, single_column("account_id", "act_1")).await;
    mount_sheet(&server, "Campaign Metrics", 500, String::new()).await;
    mount_sheet(&server, "Last Run", 200, single_column("last_run_timestamp", "x")).await;

    let err = load_dashboard(&client(&server), &SheetNames::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch sheet \"Campaign Metrics\": 500");
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SHEET_PATH))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(single_column("account_id", "act_1")))
        .mount(&server)
        .await;

    let http = BearerToken::new(BasicClient::new().unwrap(), "secret-token").expect("valid token");
    let client = GvizClient::new(http, server.uri(), "sheet123");

    let rows = client.fetch_table("Accounts").await.expect("authorized request");
    assert_eq!(rows.len(), 1);
}
