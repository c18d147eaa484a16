//! Integration test: issue credentials, publish them on a live hub, and run
//! the full verification pipeline over HTTP.

use idhub_client::{HttpHubClient, HubClient};
use idhub_core::{DidDocument, HubClientConfig, VerifierConfig};
use idhub_integration_tests::{Parties, RunningHub};
use idhub_verifier::CredentialsError;
use serde_json::json;

async fn publish(hub: &RunningHub, tokens: &[String]) {
    let client = HttpHubClient::new(&HubClientConfig::default()).expect("client");
    for token in tokens {
        client
            .add_verifiable_credential(&hub.url, token.as_bytes())
            .await
            .expect("publish");
    }
}

#[tokio::test]
async fn test_valid_credentials_are_returned() {
    let hub = RunningHub::start(None).await;
    let parties = Parties::new(&hub.url);
    publish(
        &hub,
        &[
            parties.issue("urn:uuid:kyc", json!({ "type": ["KycBasic"], "country": "BR" })),
            parties.issue("urn:uuid:degree", json!({ "degree": "MSc" })),
        ],
    )
    .await;

    let credentials = parties
        .verifier(VerifierConfig::default())
        .get_verified_credentials(&parties.subject)
        .await
        .unwrap();

    assert_eq!(credentials.len(), 2);
    assert_eq!(credentials[0].id(), "urn:uuid:kyc");
    assert_eq!(credentials[0].claim("country"), Some(&json!("BR")));
    assert_eq!(credentials[1].id(), "urn:uuid:degree");
    for credential in &credentials {
        assert_eq!(credential.issuer(), parties.issuer.id);
        assert_eq!(credential.subject(), parties.subject.id);
    }
}

#[tokio::test]
async fn test_bad_entries_are_dropped() {
    let hub = RunningHub::start(None).await;
    let parties = Parties::new(&hub.url);
    let expired = {
        let claims = idhub_verifier::JwtClaims {
            exp: Some(chrono::Utc::now().timestamp() - 86_400),
            ..idhub_verifier::JwtClaims::new(
                &parties.issuer.id,
                &parties.subject.id,
                json!({ "id": "urn:uuid:expired" }),
            )
        };
        claims
            .sign(&parties.issuer.verification_methods[0].id, &parties.issuer_key)
            .unwrap()
    };
    publish(
        &hub,
        &[
            "not-a-jwt".to_string(),
            parties.forge("urn:uuid:forged"),
            parties.issue_about("did:idhub:key:someone-else", "urn:uuid:other", json!({})),
            expired,
            parties.issue("urn:uuid:good", json!({})),
        ],
    )
    .await;

    let credentials = parties
        .verifier(VerifierConfig::default())
        .get_verified_credentials(&parties.subject)
        .await
        .unwrap();

    let ids: Vec<_> = credentials.iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec!["urn:uuid:good"]);
}

#[tokio::test]
async fn test_unknown_issuer_is_dropped() {
    let hub = RunningHub::start(None).await;
    let parties = Parties::new(&hub.url);
    let stranger = Parties::new(&hub.url);
    publish(
        &hub,
        &[stranger.issue_about(&parties.subject.id, "urn:uuid:stranger", json!({}))],
    )
    .await;

    let credentials = parties
        .verifier(VerifierConfig::default())
        .get_verified_credentials(&parties.subject)
        .await
        .unwrap();
    assert!(credentials.is_empty());
}

#[tokio::test]
async fn test_concurrent_verification_matches_sequential() {
    let hub = RunningHub::start(None).await;
    let parties = Parties::new(&hub.url);
    let tokens: Vec<String> = (0..10)
        .map(|i| {
            if i % 4 == 0 {
                parties.forge(&format!("urn:uuid:{}", i))
            } else {
                parties.issue(&format!("urn:uuid:{}", i), json!({ "n": i }))
            }
        })
        .collect();
    publish(&hub, &tokens).await;

    let sequential = parties
        .verifier(VerifierConfig::default())
        .get_verified_credentials(&parties.subject)
        .await
        .unwrap();
    let concurrent = parties
        .verifier(VerifierConfig {
            verification_concurrency: 4,
            ..Default::default()
        })
        .get_verified_credentials(&parties.subject)
        .await
        .unwrap();

    assert_eq!(sequential.len(), 7);
    assert_eq!(sequential, concurrent);
}

#[tokio::test]
async fn test_no_hub_service() {
    let parties = Parties::new("http://127.0.0.1:1/");
    let document = DidDocument::new(parties.subject.id.clone());

    let err = parties
        .verifier(VerifierConfig::default())
        .get_verified_credentials(&document)
        .await
        .unwrap_err();
    assert_eq!(
        err.failure_messages(),
        vec!["Failed getting Identity Hub URL".to_string()]
    );
}

#[tokio::test]
async fn test_unreachable_hub_fails_the_call() {
    let hub = RunningHub::start(None).await;
    let url = hub.url.clone();
    drop(hub);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let parties = Parties::new(&url);

    let err = parties
        .verifier(VerifierConfig::default())
        .get_verified_credentials(&parties.subject)
        .await
        .unwrap_err();
    assert!(matches!(err, CredentialsError::Fetch(ref e) if !e.is_fatal()));
}
