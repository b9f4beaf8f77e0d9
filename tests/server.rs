use std::sync::Arc;
use std::time::{Duration, Instant};

use econsearch::server::build_router;
use econsearch::{SearchClient, SearchConfig, Session};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start the app on an ephemeral port backed by `model`; returns its base URL.
async fn spawn_app(model: &MockServer) -> String {
    let config = SearchConfig::new("test-key").with_base_url(model.uri());
    let session = Arc::new(Session::new(SearchClient::new(config).expect("client")));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, build_router(session)).await;
    });
    format!("http://{}", addr)
}

async fn mount_papers(model: &MockServer) {
    let payload = json!({
        "papers": [{
            "title": "Carbon <Taxes>",
            "authors": "Metcalf",
            "year": "2019",
            "journal": "JEP",
            "summary": "Evidence on carbon taxes.",
            "keyFindings": ["Emissions fall"],
            "policyImplementations": ["Price carbon"],
            "similarTopics": ["Cap and trade"]
        }],
        "clarifications": ["carbon tax in Sweden"],
        "totalResultsEstimate": "80+"
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": format!("```json\n{}\n```", payload)}]}}]
        })))
        .mount(model)
        .await;
}

/// Poll `/` until the in-flight search has settled.
async fn settled_page(client: &reqwest::Client, base: &str) -> String {
    for _ in 0..100 {
        let page = client
            .get(format!("{}/", base))
            .send()
            .await
            .expect("request")
            .text()
            .await
            .expect("body");
        if !page.contains(r#"class="spinner""#) {
            return page;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("search did not settle");
}

#[tokio::test]
async fn health_returns_ok() {
    let model = MockServer::start().await;
    let base = spawn_app(&model).await;

    let body = reqwest::get(format!("{}/health", base))
        .await
        .expect("request")
        .text()
        .await
        .expect("body");
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn form_search_redirects_to_rendered_results() {
    let model = MockServer::start().await;
    mount_papers(&model).await;
    let base = spawn_app(&model).await;

    let client = reqwest::Client::new();
    client
        .post(format!("{}/search", base))
        .form(&[("query", "carbon tax"), ("authors", ""), ("year_start", "2015")])
        .send()
        .await
        .expect("request");
    let page = settled_page(&client, &base).await;

    assert!(page.contains("Carbon &lt;Taxes&gt;"));
    assert!(page.contains("Displaying 1 papers"));
    assert!(page.contains("carbon tax in Sweden"));
    assert!(page.contains(r#"value="2015""#));
    assert!(!page.contains("Emissions fall"));
}

#[tokio::test]
async fn clarification_and_toggle_routes_update_the_page() {
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("carbon tax in Sweden"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "{\"papers\": [{\"title\": \"Swedish Evidence\"}]}"}]}}]
        })))
        .expect(1)
        .mount(&model)
        .await;
    mount_papers(&model).await;
    let base = spawn_app(&model).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/clarify", base))
        .form(&[("clarification", "carbon tax in Sweden")])
        .send()
        .await
        .expect("request");
    let page = settled_page(&client, &base).await;
    assert!(page.contains("Swedish Evidence"));
    assert!(page.contains(r#"value="carbon tax in Sweden""#));

    let id = page
        .split("action=\"/papers/")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .expect("paper id in page")
        .to_string();

    let page = client
        .post(format!("{}/papers/{}/toggle", base, id))
        .send()
        .await
        .expect("request")
        .text()
        .await
        .expect("body");
    assert!(page.contains("Collapse Analysis"));
}

#[tokio::test]
async fn search_post_returns_loading_page_before_model_answers() {
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("slow topic"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(json!({
                    "candidates": [{"content": {"parts": [{"text": "{\"papers\": []}"}]}}]
                })),
        )
        .mount(&model)
        .await;
    mount_papers(&model).await;
    let base = spawn_app(&model).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/search", base))
        .form(&[("query", "carbon tax")])
        .send()
        .await
        .expect("request");
    assert!(settled_page(&client, &base).await.contains("Carbon &lt;Taxes&gt;"));

    let started = Instant::now();
    let page = client
        .post(format!("{}/search", base))
        .form(&[("query", "slow topic")])
        .send()
        .await
        .expect("request")
        .text()
        .await
        .expect("body");

    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(page.contains(r#"class="spinner""#));
    assert!(page.contains(">Analyzing...</button>"));
    assert!(page.contains(r#"http-equiv="refresh""#));
    assert!(!page.contains("Carbon &lt;Taxes&gt;"));
    assert!(!page.contains("carbon tax in Sweden"));
}

#[tokio::test]
async fn toggle_with_unknown_id_redirects_home() {
    let model = MockServer::start().await;
    let base = spawn_app(&model).await;

    let response = reqwest::Client::new()
        .post(format!("{}/papers/%0A/toggle", base))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);
    assert_eq!(response.url().path(), "/");
    assert_eq!(response.url().fragment(), None);
}

#[tokio::test]
async fn api_search_returns_json_or_gateway_error() {
    let model = MockServer::start().await;
    mount_papers(&model).await;
    let base = spawn_app(&model).await;

    let response = reqwest::get(format!("{}/api/search?q=carbon%20tax&year_start=2015", base))
        .await
        .expect("request");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body["papers"][0]["title"], "Carbon <Taxes>");
    assert_eq!(body["totalResultsEstimate"], "80+");

    let response = reqwest::get(format!("{}/api/search?q=%20", base))
        .await
        .expect("request");
    assert_eq!(response.status(), 400);
}
