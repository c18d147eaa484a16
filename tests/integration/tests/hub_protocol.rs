//! Integration test: HTTP hub client against a live hub node.

use idhub_client::{HttpHubClient, HubClient, ResponseStatus};
use idhub_core::{HubClientConfig, RequestObject, ResponseObject};
use idhub_integration_tests::RunningHub;

fn client() -> HttpHubClient {
    HttpHubClient::new(&HubClientConfig::default()).expect("client")
}

#[tokio::test]
async fn test_empty_hub_returns_no_entries() {
    let hub = RunningHub::start(None).await;
    let entries = client().get_verifiable_credentials(&hub.url).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_push_then_fetch_preserves_order_and_bytes() {
    let hub = RunningHub::start(Some("did:idhub:key:subject".into())).await;
    let client = client();

    for token in ["a.b.c", "d.e.f", "g.h.i"] {
        client
            .add_verifiable_credential(&hub.url, token.as_bytes())
            .await
            .unwrap();
    }

    let entries = client.get_verifiable_credentials(&hub.url).await.unwrap();
    assert_eq!(
        entries,
        vec![b"a.b.c".to_vec(), b"d.e.f".to_vec(), b"g.h.i".to_vec()]
    );
}

#[tokio::test]
async fn test_duplicate_push_is_stored_once() {
    let hub = RunningHub::start(None).await;
    let client = client();

    client.add_verifiable_credential(&hub.url, b"x.y.z").await.unwrap();
    client.add_verifiable_credential(&hub.url, b"x.y.z").await.unwrap();

    assert_eq!(hub.state.store.len(), 1);
    let entries = client.get_verifiable_credentials(&hub.url).await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_concurrent_pushes() {
    let hub = RunningHub::start(None).await;
    let client = client();

    let pushes = (0..20).map(|i| {
        let client = client.clone();
        let url = hub.url.clone();
        async move {
            client
                .add_verifiable_credential(&url, format!("h.p{}.s", i).as_bytes())
                .await
        }
    });
    for result in futures::future::join_all(pushes).await {
        result.unwrap();
    }

    assert_eq!(hub.state.store.len(), 20);
}

#[tokio::test]
async fn test_wrong_path_is_fatal() {
    let hub = RunningHub::start(None).await;
    let err = client()
        .get_verifiable_credentials(&format!("{}does-not-exist", hub.url))
        .await
        .unwrap_err();
    assert_eq!(err.status, ResponseStatus::FatalError);
}

#[tokio::test]
async fn test_stopped_hub_is_retryable() {
    let hub = RunningHub::start(None).await;
    let url = hub.url.clone();
    drop(hub);
    // Give the aborted server task a moment to release the socket.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let err = client().get_verifiable_credentials(&url).await.unwrap_err();
    assert_eq!(err.status, ResponseStatus::ErrorRetry);
}

#[tokio::test]
async fn test_raw_protocol_errors() {
    let hub = RunningHub::start(None).await;
    let http = reqwest::Client::new();

    let resp = http
        .post(&hub.url)
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: ResponseObject = resp.json().await.unwrap();
    assert_eq!(body.status.code, 400);

    let mut request = RequestObject::collections_query();
    request.messages[0].descriptor.method = "ProfileRead".into();
    let body: ResponseObject = http
        .post(&hub.url)
        .json(&request)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.replies[0].status.code, 501);
}

#[tokio::test]
async fn test_health_and_status() {
    let hub = RunningHub::start(Some("did:idhub:key:subject".into())).await;
    hub.state.store.add(b"one.two.three".to_vec());

    let http = reqwest::Client::new();
    let health: serde_json::Value = http
        .get(format!("{}health", hub.url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");

    let status: serde_json::Value = http
        .get(format!("{}status", hub.url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["did"], "did:idhub:key:subject");
    assert_eq!(status["credential_count"], 1);
}
