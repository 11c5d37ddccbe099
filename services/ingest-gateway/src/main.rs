mod app;
mod config;
mod error;
mod gateway;
mod handlers;
mod models;
mod sink;
mod source;
mod state;

use gateway_common::{bind_listener, init_tracing, shutdown_signal};
use std::sync::Arc;

use crate::config::{GatewayConfig, SinkConfig};
use crate::gateway::IngestGateway;
use crate::sink::{spawn_log_drain, ChannelSink, MessageSink, RabbitMqSink};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let guards = init_tracing("ingest-gateway");

    let config = GatewayConfig::from_env()
        .inspect_err(|err| tracing::error!(error = %err, "invalid configuration"))?;

    let mut drain = None;
    let sink: Arc<dyn MessageSink> = match &config.sink {
        SinkConfig::RabbitMq(rabbit) => Arc::new(RabbitMqSink::new(rabbit)?),
        SinkConfig::Log { capacity } => {
            let (sink, receiver) = ChannelSink::new(*capacity);
            drain = Some(spawn_log_drain(receiver));
            Arc::new(sink)
        }
    };

    let gateway = IngestGateway::new(sink, config.envelope_mode);
    tracing::info!(
        port = config.port,
        route = config.route.as_str(),
        sink = %gateway.sink_label(),
        envelope_mode = ?config.envelope_mode,
        file_logging = guards.writes_to_file(),
        "ingest gateway starting"
    );

    let app = app::build_router(AppState::new(gateway, config.max_body_bytes), &config.route);
    let listener = bind_listener(config.port).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last sender; the drain finishes once queued messages are logged.
    if let Some(drain) = drain {
        if let Err(err) = drain.await {
            tracing::warn!(error = %err, "log sink drain task failed");
        }
    }

    Ok(())
}
