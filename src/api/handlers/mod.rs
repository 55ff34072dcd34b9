use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::SharedSession;
use crate::error::Error;
use crate::models::FeatureTree;
use crate::protocol::{DomainEvent, HostMessage, OutboundMessage};

// ============================================================
// Error Handling
// ============================================================

/// Map a rejected message to a response. Protocol errors are the sender's
/// fault; invariant errors conflict with the current tree.
fn reject(e: Error) -> (StatusCode, String) {
    let msg = e.to_string();
    tracing::warn!("Rejected message: {}", msg);

    if e.is_protocol() {
        (StatusCode::BAD_REQUEST, msg)
    } else {
        (StatusCode::CONFLICT, msg)
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Inbound
// ============================================================

pub async fn post_host_message(
    State(session): State<SharedSession>,
    body: String,
) -> Result<StatusCode, (StatusCode, String)> {
    let message = HostMessage::parse(&body).map_err(reject)?;
    session
        .lock()
        .expect("session lock poisoned")
        .handle_host(message)
        .map_err(reject)?;
    Ok(StatusCode::ACCEPTED)
}

pub async fn post_domain_event(
    State(session): State<SharedSession>,
    body: String,
) -> Result<StatusCode, (StatusCode, String)> {
    let event = DomainEvent::parse(&body).map_err(reject)?;
    session
        .lock()
        .expect("session lock poisoned")
        .handle_event(event)
        .map_err(reject)?;
    Ok(StatusCode::ACCEPTED)
}

// ============================================================
// Outbound
// ============================================================

pub async fn drain_outbox(State(session): State<SharedSession>) -> Json<Vec<OutboundMessage>> {
    let messages = session
        .lock()
        .expect("session lock poisoned")
        .sink_mut()
        .drain();
    Json(messages)
}

// ============================================================
// Snapshots
// ============================================================

pub async fn get_features(State(session): State<SharedSession>) -> Json<FeatureTree> {
    let tree = session.lock().expect("session lock poisoned").tree().clone();
    Json(tree)
}

/// The rendered view, reconciled up to the current tree first.
pub async fn get_view(State(session): State<SharedSession>) -> String {
    let mut session = session.lock().expect("session lock poisoned");
    session.tick();
    session.view().render()
}
