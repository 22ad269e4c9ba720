//! End-to-end pipeline tests over mocked providers and a recording mailer.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rivalscan_core::ReportDocument;
use rivalscan_llm::OpenRouterClient;
use rivalscan_mailer::{MailError, ReportMailer};
use rivalscan_serp::SerpClient;

use super::{execute, ReportRequest, RunError};

struct SentMail {
    to: String,
    subject: String,
    filename: String,
    bytes: Vec<u8>,
}

#[derive(Default)]
struct FakeMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl FakeMailer {
    fn sent_count(&self) -> usize {
        self.sent.lock().expect("mailer lock").len()
    }
}

impl ReportMailer for FakeMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        _body: &str,
        document: &ReportDocument,
    ) -> Result<DateTime<Utc>, MailError> {
        self.sent.lock().expect("mailer lock").push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            filename: document.filename(),
            bytes: document.bytes.clone(),
        });
        Ok(Utc::now())
    }
}

fn request() -> ReportRequest {
    ReportRequest {
        product: "Acme".to_string(),
        niche: None,
        recipient: "buyer@example.com".to_string(),
        limit: 5,
        aspects: Vec::new(),
    }
}

fn serp_client(server: &MockServer) -> SerpClient {
    SerpClient::with_base_url("serp-key", 30, &server.uri()).expect("serp client")
}

fn llm_client(server: &MockServer) -> OpenRouterClient {
    OpenRouterClient::with_base_url("llm-key", "test/model", 30, &server.uri())
        .expect("llm client")
}

fn organic(title: &str, link: &str, snippet: &str) -> serde_json::Value {
    serde_json::json!({ "title": title, "link": link, "snippet": snippet })
}

async fn mount_search(server: &MockServer, query: &str, results: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", query))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "organic_results": results })),
        )
        .mount(server)
        .await;
}

async fn mount_chat(server: &MockServer, content: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [ { "message": { "role": "assistant", "content": content } } ]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_two_candidate_searches(serp_server: &MockServer) {
    mount_search(
        serp_server,
        "Acme tool description",
        serde_json::json!([organic(
            "Acme",
            "https://acme.example",
            "Acme catches roadrunners."
        )]),
    )
    .await;
    mount_search(
        serp_server,
        "Acme competitors alternatives",
        serde_json::json!([
            organic("Globex - G2", "https://globex.example", "Globex does widgets"),
            organic("Initech | Review", "https://initech.example", "Initech does widgets"),
        ]),
    )
    .await;
}

#[tokio::test]
async fn full_sections_produce_a_delivered_two_section_report() {
    let serp_server = MockServer::start().await;
    let llm_server = MockServer::start().await;

    mount_two_candidate_searches(&serp_server).await;
    mount_chat(
        &llm_server,
        "Strengths:\n- Faster\nWeaknesses:\n- Pricier\nUse Cases:\n- Startups\nImprovements:\n- Add SSO\n",
        2,
    )
    .await;

    let mailer = FakeMailer::default();
    let outcome = execute(
        &serp_client(&serp_server),
        &llm_client(&llm_server),
        &mailer,
        &request(),
    )
    .await
    .expect("run should succeed");

    assert_eq!(outcome.competitors, 2);
    assert_eq!(outcome.title, "Competitor Report: Acme");

    let sent = mailer.sent.lock().expect("mailer lock");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "buyer@example.com");
    assert!(sent[0].subject.contains("Acme"));
    assert!(sent[0].filename.ends_with(".pdf"));
    assert!(sent[0].bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn unmarked_generation_text_still_succeeds() {
    let serp_server = MockServer::start().await;
    let llm_server = MockServer::start().await;

    mount_two_candidate_searches(&serp_server).await;
    mount_chat(&llm_server, "Rambling prose with no recognizable markers.", 2).await;

    let mailer = FakeMailer::default();
    let outcome = execute(
        &serp_client(&serp_server),
        &llm_client(&llm_server),
        &mailer,
        &request(),
    )
    .await
    .expect("degraded parsing should not fail the run");

    assert_eq!(outcome.competitors, 2);
    assert_eq!(mailer.sent_count(), 1);
}

#[tokio::test]
async fn search_failure_stops_the_run_before_generation_and_delivery() {
    let serp_server = MockServer::start().await;
    let llm_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&serp_server)
        .await;
    // Generation must never be reached.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&llm_server)
        .await;

    let mailer = FakeMailer::default();
    let err = execute(
        &serp_client(&serp_server),
        &llm_client(&llm_server),
        &mailer,
        &request(),
    )
    .await
    .expect_err("search failure should fail the run");

    assert!(matches!(
        err,
        RunError::UpstreamUnavailable { stage: "search", .. }
    ));
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn hanging_search_fails_as_upstream_unavailable() {
    let serp_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "organic_results": [] }))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&serp_server)
        .await;

    let serp = SerpClient::with_base_url("serp-key", 1, &serp_server.uri()).expect("serp client");
    let llm_server = MockServer::start().await;
    let mailer = FakeMailer::default();

    let err = execute(&serp, &llm_client(&llm_server), &mailer, &request())
        .await
        .expect_err("timeout should fail the run");

    assert_eq!(err.stage(), "search");
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn malformed_recipient_fails_before_any_network_call() {
    let serp_server = MockServer::start().await;
    let llm_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&serp_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&llm_server)
        .await;

    let mailer = FakeMailer::default();
    let mut bad_request = request();
    bad_request.recipient = "not-an-email".to_string();

    let err = execute(
        &serp_client(&serp_server),
        &llm_client(&llm_server),
        &mailer,
        &bad_request,
    )
    .await
    .expect_err("malformed recipient should fail validation");

    assert!(matches!(err, RunError::Validation(_)));
    assert_eq!(err.stage(), "validate");
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn zero_candidates_still_deliver_a_placeholder_report() {
    let serp_server = MockServer::start().await;
    let llm_server = MockServer::start().await;

    mount_search(
        &serp_server,
        "Acme tool description",
        serde_json::json!([]),
    )
    .await;
    mount_search(
        &serp_server,
        "Acme competitors alternatives",
        serde_json::json!([]),
    )
    .await;
    // No candidates means no generation calls.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&llm_server)
        .await;

    let mailer = FakeMailer::default();
    let outcome = execute(
        &serp_client(&serp_server),
        &llm_client(&llm_server),
        &mailer,
        &request(),
    )
    .await
    .expect("empty discovery should still render and deliver");

    assert_eq!(outcome.competitors, 0);
    assert_eq!(mailer.sent_count(), 1);
}
