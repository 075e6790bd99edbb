use pbdns_exporter_infrastructure::telemetry::{ConnectionSupervisor, EventHandoff, FrameSettings};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Binds the protobuf listener and accepts senders until `shutdown` fires.
pub async fn start_ingest_server(
    bind_addr: SocketAddr,
    handoff: EventHandoff,
    settings: FrameSettings,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let supervisor = ConnectionSupervisor::bind(bind_addr, handoff, settings).await?;

    info!(
        bind_address = %supervisor.local_addr()?,
        prefix_bytes = settings.prefix_width.byte_len(),
        "Protobuf listener ready"
    );

    supervisor.run(shutdown).await;

    info!("Protobuf listener stopped");
    Ok(())
}
