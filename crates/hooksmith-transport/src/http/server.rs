//! Webhook HTTP server.
//!
//! Serves one path with two methods:
//!
//! - `GET` answers the subscription handshake: the challenge with `200` when
//!   the mode and validation token check out, an empty `403` otherwise.
//! - `POST` receives callback batches. The body is parsed and handed to the
//!   [`WebhookHandler`] on a spawned task; the platform gets `200` as soon as
//!   the body is read, even for bodies that fail to parse.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{debug, error, info, trace, warn};

use hooksmith_core::{
    BoxedWebhookHandler, Callback, ListenerHandle, SubscriptionRequest, TransportError,
    TransportResult,
};

/// Shared state for the webhook routes.
struct ServerState {
    validation_token: String,
    handler: BoxedWebhookHandler,
}

/// The webhook endpoint.
pub struct WebhookServer {
    path: String,
    state: Arc<ServerState>,
}

impl WebhookServer {
    /// Creates a server for `path`. A missing leading `/` is added.
    pub fn new(
        path: impl Into<String>,
        validation_token: impl Into<String>,
        handler: BoxedWebhookHandler,
    ) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        Self {
            path,
            state: Arc::new(ServerState {
                validation_token: validation_token.into(),
                handler,
            }),
        }
    }

    /// The path the webhook is served on.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Builds the axum router.
    pub fn router(&self) -> Router {
        Router::new()
            .route(&self.path, get(handshake).post(callback))
            .with_state(Arc::clone(&self.state))
    }

    /// Binds `addr` and serves in a background task until the returned
    /// handle is stopped or dropped.
    pub async fn listen(&self, addr: &str) -> TransportResult<ListenerHandle> {
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| TransportError::BindFailed {
                addr: addr.to_string(),
                reason: e.to_string(),
            })?;
        let actual_addr = listener.local_addr()?;

        info!(addr = %actual_addr, path = %self.path, "Webhook server listening");

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            let server = axum::serve(listener, router);

            tokio::select! {
                result = server => {
                    if let Err(e) = result {
                        error!(error = %e, "Webhook server error");
                    }
                }
                _ = &mut shutdown_rx => {
                    info!("Webhook server shutting down");
                }
            }
        });

        Ok(ListenerHandle::new(
            format!("webhook-{actual_addr}"),
            shutdown_tx,
        ))
    }
}

impl std::fmt::Debug for WebhookServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookServer")
            .field("path", &self.path)
            .finish()
    }
}

/// GET: subscription handshake.
async fn handshake(
    State(state): State<Arc<ServerState>>,
    Query(request): Query<SubscriptionRequest>,
) -> Response {
    match request.verify(&state.validation_token) {
        Some(challenge) => {
            info!("Webhook subscription verified");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain")],
                challenge.to_string(),
            )
                .into_response()
        }
        None => {
            warn!(mode = %request.mode, "Webhook subscription rejected");
            StatusCode::FORBIDDEN.into_response()
        }
    }
}

/// POST: callback delivery.
async fn callback(State(state): State<Arc<ServerState>>, body: Bytes) -> StatusCode {
    trace!(len = body.len(), "Received webhook POST");

    let callback = match Callback::parse(&body) {
        Ok(callback) => callback,
        Err(e) => {
            error!(error = %e, "Discarding malformed callback");
            return StatusCode::OK;
        }
    };

    debug!(
        object = %callback.object,
        entries = callback.entry.len(),
        envelopes = callback.envelope_count(),
        "Parsed callback"
    );

    // The platform times out slow deliveries, so acknowledge without waiting.
    let handler = Arc::clone(&state.handler);
    tokio::spawn(async move {
        handler.on_callback(callback).await;
    });

    StatusCode::OK
}
