use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::Method,
};

use crate::error::GatewayError;

#[async_trait]
pub trait RequestSource: Send {
    fn method(&self) -> &str;

    async fn read_body(self) -> Result<Bytes, GatewayError>;
}

pub struct HttpRequestSource {
    method: Method,
    body: Body,
    limit: usize,
}

impl HttpRequestSource {
    pub fn new(method: Method, body: Body, limit: usize) -> Self {
        Self {
            method,
            body,
            limit,
        }
    }
}

#[async_trait]
impl RequestSource for HttpRequestSource {
    fn method(&self) -> &str {
        self.method.as_str()
    }

    async fn read_body(self) -> Result<Bytes, GatewayError> {
        axum::body::to_bytes(self.body, self.limit)
            .await
            .map_err(|err| GatewayError::UnreadableBody(err.to_string()))
    }
}
