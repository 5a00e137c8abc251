use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::sidecar::{PublishError, Publisher};

pub type SharedPublisher = Arc<dyn Publisher>;

/// Route the sidecar delivers binding invocations to; it matches the
/// binding's component name.
pub const BINDING_ROUTE: &str = "/tweets";

#[derive(Clone)]
pub struct RelayContext {
    pub publisher: SharedPublisher,
    pub pubsub_name: String,
    pub topic_name: String,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

impl IntoResponse for PublishError {
    fn into_response(self) -> Response {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

pub fn router(ctx: RelayContext) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(BINDING_ROUTE, post(tweet_binding).options(binding_probe))
        .with_state(ctx)
}

/// POST /tweets - Forward one binding event to the configured topic.
///
/// The body is republished byte for byte; request metadata is delivered by
/// the sidecar but has no effect here. A 200 tells the sidecar the event is
/// accepted; a 500 leaves redelivery to the sidecar's own policy.
pub async fn tweet_binding(
    State(ctx): State<RelayContext>,
    body: Bytes,
) -> Result<StatusCode, PublishError> {
    debug!(bytes = body.len(), "received tweet binding event");

    ctx.publisher
        .publish(&ctx.pubsub_name, &ctx.topic_name, body)
        .await
        .map_err(|source| {
            let err = PublishError {
                pubsub: ctx.pubsub_name.clone(),
                topic: ctx.topic_name.clone(),
                source,
            };
            error!("failed to forward tweet: {err:?}");
            err
        })?;

    Ok(StatusCode::OK)
}

/// OPTIONS /tweets - The sidecar probes this at startup to confirm the
/// binding route is handled.
pub async fn binding_probe() -> StatusCode {
    StatusCode::OK
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
