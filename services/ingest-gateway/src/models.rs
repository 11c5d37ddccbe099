use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::str::FromStr;

pub const ACCEPTED_MESSAGE: &str = "Your request accepted.";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeMode {
    #[default]
    Nested,
    Flat,
}

impl FromStr for EnvelopeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nested" => Ok(EnvelopeMode::Nested),
            "flat" => Ok(EnvelopeMode::Flat),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EnvelopeBody {
    Encoded(String),
    Object(MessageBody),
}

#[derive(Debug, Serialize)]
pub struct EnvelopeHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub body: EnvelopeBody,
    pub headers: EnvelopeHeaders,
}

impl ResponseEnvelope {
    pub fn new(status: StatusCode, message: &str, mode: EnvelopeMode) -> Self {
        let body = match mode {
            // Value's Display is the JSON text, so the nested form has no failure path.
            EnvelopeMode::Nested => EnvelopeBody::Encoded(json!({ "message": message }).to_string()),
            EnvelopeMode::Flat => EnvelopeBody::Object(MessageBody {
                message: message.to_string(),
            }),
        };
        Self {
            status: status.as_u16(),
            body,
            headers: EnvelopeHeaders {
                content_type: JSON_CONTENT_TYPE,
            },
        }
    }
}

#[derive(Debug)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub envelope: ResponseEnvelope,
}

impl GatewayResponse {
    pub fn new(status: StatusCode, message: &str, mode: EnvelopeMode) -> Self {
        Self {
            status,
            envelope: ResponseEnvelope::new(status, message, mode),
        }
    }

    pub fn accepted(mode: EnvelopeMode) -> Self {
        Self::new(StatusCode::ACCEPTED, ACCEPTED_MESSAGE, mode)
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
