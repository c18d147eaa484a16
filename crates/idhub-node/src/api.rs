//! HTTP API server for the hub node.
//!
//! The hub protocol is a single POST endpoint at `/` taking a
//! [`RequestObject`] and answering with a [`ResponseObject`]. `/health` and
//! `/status` are plain JSON probes.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use idhub_core::hub::{encode_entry, COLLECTIONS_QUERY, COLLECTIONS_WRITE};
use idhub_core::{
    CredentialEnvelope, MessageRequestObject, MessageResponseObject, RequestObject,
    RequestStatus, ResponseObject, JWT_VC_FORMAT,
};
use serde::Serialize;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::state::HubState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub version: String,
    pub did: Option<String>,
    pub credential_count: usize,
    pub uptime_secs: u64,
}

// --- Handlers ---

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

async fn handle_status(State(state): State<Arc<HubState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        did: state.did.clone(),
        credential_count: state.store.len(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

async fn handle_hub_request(
    State(state): State<Arc<HubState>>,
    body: Bytes,
) -> (StatusCode, Json<ResponseObject>) {
    let request: RequestObject = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting unparsable hub request");
            return malformed(String::new());
        }
    };

    if request.messages.is_empty() {
        tracing::debug!(request_id = %request.request_id, "rejecting hub request without messages");
        return malformed(request.request_id);
    }

    let replies = request
        .messages
        .iter()
        .map(|message| process_message(&state, message))
        .collect();

    (
        StatusCode::OK,
        Json(ResponseObject {
            request_id: request.request_id,
            status: RequestStatus::ok(),
            replies,
        }),
    )
}

fn malformed(request_id: String) -> (StatusCode, Json<ResponseObject>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ResponseObject {
            request_id,
            status: RequestStatus::malformed_message(),
            replies: Vec::new(),
        }),
    )
}

fn process_message(state: &HubState, message: &MessageRequestObject) -> MessageResponseObject {
    let descriptor = &message.descriptor;
    let mut entries = Vec::new();

    let status = match descriptor.method.as_str() {
        COLLECTIONS_QUERY => {
            entries = state
                .store
                .get_all()
                .iter()
                .map(|object| encode_entry(object))
                .collect();
            tracing::debug!(count = entries.len(), "served collection query");
            RequestStatus::ok()
        }
        COLLECTIONS_WRITE => write_object(state, message),
        other => {
            tracing::debug!(method = other, "unsupported hub interface method");
            RequestStatus::not_implemented()
        }
    };

    MessageResponseObject {
        message_id: descriptor.nonce.clone(),
        status,
        entries,
    }
}

fn write_object(state: &HubState, message: &MessageRequestObject) -> RequestStatus {
    let format = message
        .descriptor
        .data_format
        .as_deref()
        .unwrap_or(JWT_VC_FORMAT);

    let envelope = message
        .decoded_data()
        .and_then(|data| CredentialEnvelope::from_raw(format, data));

    match envelope {
        Ok(envelope) => {
            let added = state.store.add(envelope.as_bytes().to_vec());
            tracing::info!(data_format = format, added, "stored credential envelope");
            RequestStatus::ok()
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejecting collection write");
            RequestStatus::malformed_message()
        }
    }
}

// --- Server ---

pub fn build_router(state: Arc<HubState>) -> Router {
    Router::new()
        .route("/", post(handle_hub_request))
        .route("/health", get(handle_health))
        .route("/status", get(handle_status))
        .with_state(state)
}

pub async fn start_api_server(
    listen_addr: SocketAddr,
    state: Arc<HubState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, "identity hub listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
