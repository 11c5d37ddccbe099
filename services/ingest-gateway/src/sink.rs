use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::{sync::mpsc, task::JoinHandle};
use url::Url;
use uuid::Uuid;

use crate::config::RabbitMqConfig;
use crate::error::SinkError;
use crate::models::JSON_CONTENT_TYPE;

pub const DEFAULT_EXCHANGE: &str = "amq.default";
const PERSISTENT_DELIVERY: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub id: Uuid,
    pub payload: Vec<u8>,
}

impl OutboundMessage {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload,
        }
    }
}

#[async_trait]
pub trait MessageSink: Send + Sync {
    fn describe(&self) -> String;

    async fn publish(&self, message: OutboundMessage) -> Result<(), SinkError>;
}

#[derive(Clone)]
pub struct ChannelSink {
    sender: mpsc::Sender<OutboundMessage>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<OutboundMessage>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl MessageSink for ChannelSink {
    fn describe(&self) -> String {
        "channel".to_string()
    }

    async fn publish(&self, message: OutboundMessage) -> Result<(), SinkError> {
        self.sender.send(message).await.map_err(|_| SinkError::Closed)
    }
}

pub fn spawn_log_drain(mut receiver: mpsc::Receiver<OutboundMessage>) -> JoinHandle<()> {
    // Stands in for a broker in local runs.
    tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            tracing::info!(
                message_id = %message.id,
                bytes = message.payload.len(),
                payload = %String::from_utf8_lossy(&message.payload),
                "message drained"
            );
        }
        tracing::debug!("log sink drained, channel closed");
    })
}

#[derive(Clone)]
pub struct RabbitMqSink {
    client: reqwest::Client,
    publish_url: Url,
    username: String,
    password: String,
    vhost: String,
    queue_name: String,
}

#[derive(Serialize)]
struct PublishRequest<'a> {
    properties: PublishProperties,
    routing_key: &'a str,
    payload: &'a str,
    payload_encoding: &'static str,
}

#[derive(Serialize)]
struct PublishProperties {
    message_id: String,
    content_type: &'static str,
    delivery_mode: u8,
}

#[derive(Deserialize)]
struct PublishResponse {
    routed: bool,
}

impl RabbitMqSink {
    pub fn new(config: &RabbitMqConfig) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.disable_certificate_validation)
            .build()?;
        Ok(Self {
            client,
            publish_url: config.publish_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            vhost: config.vhost.clone(),
            queue_name: config.queue_name.clone(),
        })
    }
}

#[async_trait]
impl MessageSink for RabbitMqSink {
    fn describe(&self) -> String {
        format!("rabbitmq vhost={} queue={}", self.vhost, self.queue_name)
    }

    async fn publish(&self, message: OutboundMessage) -> Result<(), SinkError> {
        let payload = std::str::from_utf8(&message.payload)?;
        let request = PublishRequest {
            properties: PublishProperties {
                message_id: message.id.to_string(),
                content_type: JSON_CONTENT_TYPE,
                delivery_mode: PERSISTENT_DELIVERY,
            },
            routing_key: self.queue_name.as_str(),
            payload,
            payload_encoding: "string",
        };

        let response = self
            .client
            .post(self.publish_url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Rejected {
                status: status.as_u16(),
            });
        }

        // The broker answers routed=false when no queue is bound to the routing key.
        let outcome: PublishResponse = response.json().await?;
        if !outcome.routed {
            return Err(SinkError::Unrouted {
                queue: self.queue_name.clone(),
            });
        }

        tracing::debug!(message_id = %message.id, queue = self.queue_name.as_str(), "published");
        Ok(())
    }
}
