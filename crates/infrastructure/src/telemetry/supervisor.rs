use super::{EnvelopeDecoder, EventHandoff, FrameReader};
use pbdns_exporter_domain::config::HandoffConfig;
use pbdns_exporter_domain::{FramingError, IngestError, PrefixWidth};
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

/// Pause after a failed accept, so a persistent error (fd exhaustion)
/// does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Framing parameters shared by every connection of one listener.
#[derive(Debug, Clone, Copy)]
pub struct FrameSettings {
    pub prefix_width: PrefixWidth,
    pub max_frame_size: usize,
}

impl From<&HandoffConfig> for FrameSettings {
    fn from(config: &HandoffConfig) -> Self {
        Self {
            prefix_width: config.prefix_width,
            max_frame_size: config.max_frame_size,
        }
    }
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self::from(&HandoffConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionState {
    Connected,
    Reading,
    Decoding,
    Closed,
}

/// Why a connection ended. Every variant releases the socket.
#[derive(Debug)]
pub enum CloseReason {
    /// Peer closed on a frame boundary.
    PeerClosed,
    Framing(FramingError),
    HandoffClosed,
    Shutdown,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::PeerClosed => f.write_str("peer closed"),
            CloseReason::Framing(e) => write!(f, "{}", e),
            CloseReason::HandoffClosed => f.write_str("handoff closed"),
            CloseReason::Shutdown => f.write_str("shutdown"),
        }
    }
}

/// Accepts sender connections and runs one independent reading pipeline per
/// connection. A failure inside one pipeline closes that connection only.
pub struct ConnectionSupervisor {
    listener: TcpListener,
    handoff: EventHandoff,
    settings: FrameSettings,
}

impl ConnectionSupervisor {
    pub async fn bind(
        addr: SocketAddr,
        handoff: EventHandoff,
        settings: FrameSettings,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self::from_listener(listener, handoff, settings))
    }

    pub fn from_listener(
        listener: TcpListener,
        handoff: EventHandoff,
        settings: FrameSettings,
    ) -> Self {
        Self {
            listener,
            handoff,
            settings,
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts until `shutdown` is cancelled, then waits for the open
    /// connections to wind down. The handoff is dropped on return.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut connections = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,

                Some(finished) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(e) = finished {
                        if e.is_panic() {
                            error!(error = %e, "Connection task panicked");
                        }
                    }
                }

                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        info!(peer = %peer, "Protobuf connection established");
                        connections.spawn(serve_connection(
                            stream,
                            peer,
                            self.handoff.clone(),
                            self.settings,
                            shutdown.child_token(),
                        ));
                    }
                    Err(e) => {
                        let err = IngestError::ListenerAccept(e);
                        warn!(error = %err, "Accept failed, continuing");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
            }
        }

        debug!(open = connections.len(), "Supervisor stopping, draining connections");
        while connections.join_next().await.is_some() {}
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    handoff: EventHandoff,
    settings: FrameSettings,
    shutdown: CancellationToken,
) -> CloseReason {
    let mut reader = FrameReader::new(stream, settings.prefix_width, settings.max_frame_size);
    let mut state = ConnectionState::Connected;
    let mut frames = 0u64;
    let mut malformed = 0u64;

    let reason = loop {
        state = transition(peer, state, ConnectionState::Reading);

        let next = tokio::select! {
            _ = shutdown.cancelled() => break CloseReason::Shutdown,
            next = reader.next_frame() => next,
        };

        let payload = match next {
            Ok(Some(payload)) => payload,
            Ok(None) => break CloseReason::PeerClosed,
            Err(e) => break CloseReason::Framing(e),
        };
        frames += 1;

        state = transition(peer, state, ConnectionState::Decoding);

        let event = match EnvelopeDecoder::decode(&payload) {
            Ok(event) => event,
            Err(e) => {
                malformed += 1;
                warn!(peer = %peer, error = %e, "Cannot unmarshal envelope, skipping frame");
                continue;
            }
        };

        match handoff.forward(event).await {
            Ok(()) => {}
            Err(IngestError::HandoffClosed) => break CloseReason::HandoffClosed,
            // Saturation is already counted and logged by the handoff.
            Err(_) => {}
        }
    };

    transition(peer, state, ConnectionState::Closed);

    match &reason {
        CloseReason::PeerClosed | CloseReason::Shutdown => {
            info!(peer = %peer, frames, malformed, reason = %reason, "Protobuf connection closed");
        }
        CloseReason::Framing(_) | CloseReason::HandoffClosed => {
            warn!(peer = %peer, frames, malformed, reason = %reason, "Protobuf connection closed on error");
        }
    }

    reason
}

fn transition(peer: SocketAddr, from: ConnectionState, to: ConnectionState) -> ConnectionState {
    trace!(peer = %peer, from = ?from, to = ?to, "Connection state");
    to
}
