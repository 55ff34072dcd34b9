mod handlers;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::session::Session;

/// The session behind the HTTP bridge. The lock serializes requests, so
/// messages are applied strictly in arrival order.
pub type SharedSession = Arc<Mutex<Session>>;

pub fn shared_session() -> SharedSession {
    Arc::new(Mutex::new(Session::default()))
}

pub fn create_router(session: SharedSession) -> Router {
    let api = Router::new()
        // Inbound
        .route("/host", post(handlers::post_host_message))
        .route("/events", post(handlers::post_domain_event))
        // Outbound
        .route("/outbox/drain", post(handlers::drain_outbox))
        // Snapshots
        .route("/features", get(handlers::get_features))
        .route("/view", get(handlers::get_view))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(session)
}

/// Reconcile the view once per `period` for as long as the server runs.
pub fn spawn_ticker(session: SharedSession, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            session.lock().expect("session lock poisoned").tick();
        }
    })
}
