use axum::http::Method;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::models::{EnvelopeMode, GatewayResponse};
use crate::sink::{MessageSink, OutboundMessage};
use crate::source::RequestSource;

#[derive(Clone)]
pub struct IngestGateway {
    sink: Arc<dyn MessageSink>,
    envelope_mode: EnvelopeMode,
}

impl IngestGateway {
    pub fn new(sink: Arc<dyn MessageSink>, envelope_mode: EnvelopeMode) -> Self {
        Self {
            sink,
            envelope_mode,
        }
    }

    pub fn sink_label(&self) -> String {
        self.sink.describe()
    }

    pub async fn handle<R: RequestSource>(&self, request: R) -> GatewayResponse {
        let method = request.method().to_string();
        tracing::info!(method = method.as_str(), "ingest request received");

        match self.forward(request).await {
            Ok(message_id) => {
                tracing::info!(method = method.as_str(), %message_id, "request accepted");
                GatewayResponse::accepted(self.envelope_mode)
            }
            Err(err) => {
                match &err {
                    GatewayError::UpstreamSinkFailure(source) => tracing::error!(
                        code = err.code(),
                        sink = %self.sink.describe(),
                        error = %source,
                        "message publish failed"
                    ),
                    _ => tracing::warn!(
                        method = method.as_str(),
                        code = err.code(),
                        error = %err,
                        "request rejected"
                    ),
                }
                err.into_gateway_response(self.envelope_mode)
            }
        }
    }

    pub async fn forward<R: RequestSource>(&self, request: R) -> Result<uuid::Uuid, GatewayError> {
        if request.method() != Method::POST.as_str() {
            return Err(GatewayError::MethodNotAllowed {
                method: request.method().to_string(),
            });
        }

        let body = request.read_body().await?;
        let payload = canonical_payload(&body)?;
        let message = OutboundMessage::new(payload);
        let message_id = message.id;
        tracing::debug!(%message_id, bytes = message.payload.len(), "publishing payload");

        self.sink.publish(message).await?;
        Ok(message_id)
    }
}

pub fn canonical_payload(body: &[u8]) -> Result<Vec<u8>, GatewayError> {
    // Compact re-encode; key order and number text survive the round trip.
    let value: Value = serde_json::from_slice(body)?;
    Ok(serde_json::to_vec(&value)?)
}
