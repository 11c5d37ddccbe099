use axum::http::StatusCode;
use thiserror::Error;

use crate::models::{EnvelopeMode, GatewayResponse};

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Only post method is allowed.";
pub const MALFORMED_PAYLOAD_MESSAGE: &str = "Request body must be valid JSON.";
pub const UNREADABLE_BODY_MESSAGE: &str = "Request body could not be read.";
pub const SINK_FAILURE_MESSAGE: &str = "Message could not be queued.";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("method {method} is not allowed")]
    MethodNotAllowed { method: String },

    #[error("request body is not valid JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("request body could not be read: {0}")]
    UnreadableBody(String),

    #[error("publishing to the sink failed: {0}")]
    UpstreamSinkFailure(#[from] SinkError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed { .. }
            | GatewayError::MalformedPayload(_)
            | GatewayError::UnreadableBody(_) => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamSinkFailure(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayError::MethodNotAllowed { .. } => METHOD_NOT_ALLOWED_MESSAGE,
            GatewayError::MalformedPayload(_) => MALFORMED_PAYLOAD_MESSAGE,
            GatewayError::UnreadableBody(_) => UNREADABLE_BODY_MESSAGE,
            GatewayError::UpstreamSinkFailure(_) => SINK_FAILURE_MESSAGE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::MethodNotAllowed { .. } => "method_not_allowed",
            GatewayError::MalformedPayload(_) => "malformed_payload",
            GatewayError::UnreadableBody(_) => "unreadable_body",
            GatewayError::UpstreamSinkFailure(_) => "upstream_sink_failure",
        }
    }

    pub fn into_gateway_response(self, mode: EnvelopeMode) -> GatewayResponse {
        GatewayResponse::new(self.status(), self.public_message(), mode)
    }
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink channel is closed")]
    Closed,

    #[error("broker request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("broker rejected publish with status {status}")]
    Rejected { status: u16 },

    #[error("message was not routed to queue {queue}")]
    Unrouted { queue: String },

    #[error("payload is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no RabbitMQ connection string: set {setting} or RABBITMQ_CONNECTION_STRING")]
    MissingConnection { setting: String },

    #[error("invalid RabbitMQ connection string: {0}")]
    InvalidConnection(String),

    #[error("invalid RabbitMQ management url: {0}")]
    InvalidManagementUrl(String),

    #[error("RABBITMQ_QUEUE_NAME is required for the rabbitmq sink")]
    MissingQueue,

    #[error("unknown SINK_KIND {0:?} (expected rabbitmq or log)")]
    UnknownSinkKind(String),

    #[error("unknown ENVELOPE_MODE {0:?} (expected nested or flat)")]
    UnknownEnvelopeMode(String),

    #[error("INGEST_ROUTE must start with '/', got {0:?}")]
    InvalidRoute(String),
}
