//! WebSocket transport for the client.
//!
//! Provides [`Transport`] which owns one WebSocket link and exposes it as an
//! ordered lifecycle event stream plus a state-checked `send`. This is a thin
//! layer that just moves text; session logic remains in the Sans-IO
//! [`Client`](crate::Client).
//!
//! A single task owns the socket, so events are emitted in the order they
//! occurred on the stream. Binary payloads are decoded inside that task before
//! the event is queued, so consumers never observe partially decoded text.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use parley_proto::decode_text;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::TransportEvent;

/// Time allowed for the WebSocket handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Lifecycle events buffered before the link task waits on the consumer.
pub const DEFAULT_EVENT_CAPACITY: usize = 32;

/// Path appended to bare `host:port` endpoints.
const DEFAULT_PATH: &str = "/ws";

/// Link state observed by [`Transport::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Handshake in progress.
    Connecting,
    /// Link is open and accepts sends.
    Open,
    /// Link closed normally. Terminal.
    Closed,
    /// Link failed or never opened. Terminal.
    Errored,
}

impl LinkState {
    /// True for `Closed` and `Errored`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Errored)
    }
}

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Send attempted while the link is not open.
    #[error("link is not open ({state:?})")]
    NotOpen {
        /// Link state at the time of the send.
        state: LinkState,
    },

    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Stream failed after the link opened.
    #[error("stream error: {0}")]
    Stream(String),
}

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Timeout for completing the WebSocket handshake.
    pub connect_timeout: Duration,
    /// Capacity of the lifecycle event channel.
    pub event_capacity: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { connect_timeout: DEFAULT_CONNECT_TIMEOUT, event_capacity: DEFAULT_EVENT_CAPACITY }
    }
}

/// Handle to one WebSocket link.
///
/// Dropping the handle aborts the link task.
pub struct Transport {
    /// Text queued for the link task.
    outbound: mpsc::UnboundedSender<String>,
    /// Lifecycle events from the link task.
    events: mpsc::Receiver<TransportEvent>,
    /// Current link state, published by the link task.
    state: watch::Receiver<LinkState>,
    /// Abort handle for the link task.
    abort_handle: tokio::task::AbortHandle,
}

impl Transport {
    /// Current link state.
    pub fn state(&self) -> LinkState {
        *self.state.borrow()
    }

    /// Queue text for sending.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::NotOpen`] unless the link is open.
    pub fn send(&self, text: impl Into<String>) -> Result<(), TransportError> {
        let state = self.state();
        if state != LinkState::Open {
            return Err(TransportError::NotOpen { state });
        }

        self.outbound.send(text.into()).map_err(|_| TransportError::NotOpen { state: self.state() })
    }

    /// Wait for the next lifecycle event.
    ///
    /// Returns `None` once the terminal event has been consumed.
    pub async fn next_event(&mut self) -> Option<TransportEvent> {
        self.events.recv().await
    }

    /// Next lifecycle event if one is ready.
    pub fn try_next_event(&mut self) -> Option<TransportEvent> {
        self.events.try_recv().ok()
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.abort_handle.abort();
    }
}

/// Normalize a server address into a WebSocket URL.
///
/// Addresses that already carry a `ws://` or `wss://` scheme are returned
/// unchanged; bare `host:port` addresses get the default `/ws` path.
pub fn normalize_endpoint(addr: &str) -> String {
    let addr = addr.trim();
    if addr.starts_with("ws://") || addr.starts_with("wss://") {
        addr.to_owned()
    } else {
        format!("ws://{}{DEFAULT_PATH}", addr.trim_end_matches('/'))
    }
}

/// Open a link to `endpoint` with the default configuration.
///
/// See [`connect_with_config`].
pub fn connect(endpoint: &str) -> Transport {
    connect_with_config(endpoint, TransportConfig::default())
}

/// Open a link to `endpoint`.
///
/// Returns immediately; the handshake runs on a spawned task and its outcome
/// arrives as the first lifecycle event (`Opened` or `Errored`). Must be
/// called from within a tokio runtime.
pub fn connect_with_config(endpoint: &str, config: TransportConfig) -> Transport {
    let endpoint = normalize_endpoint(endpoint);
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = mpsc::channel(config.event_capacity.max(1));
    let (state_tx, state_rx) = watch::channel(LinkState::Connecting);

    tracing::info!(%endpoint, "connecting");
    let handle = tokio::spawn(run_link(endpoint, config, state_tx, events_tx, outbound_rx));

    Transport {
        outbound: outbound_tx,
        events: events_rx,
        state: state_rx,
        abort_handle: handle.abort_handle(),
    }
}

/// Run the link: handshake, then bridge the socket and the channels until a
/// terminal event.
async fn run_link(
    endpoint: String,
    config: TransportConfig,
    state: watch::Sender<LinkState>,
    events: mpsc::Sender<TransportEvent>,
    mut outbound: mpsc::UnboundedReceiver<String>,
) {
    let socket = match tokio::time::timeout(config.connect_timeout, connect_async(endpoint.as_str())).await
    {
        Ok(Ok((socket, _response))) => socket,
        Ok(Err(e)) => {
            let reason = TransportError::Connection(e.to_string()).to_string();
            finish(&state, &events, TransportEvent::Errored { reason }).await;
            return;
        },
        Err(_) => {
            let reason = TransportError::Connection(format!(
                "handshake timed out after {:?}",
                config.connect_timeout
            ))
            .to_string();
            finish(&state, &events, TransportEvent::Errored { reason }).await;
            return;
        },
    };

    // Publish Open before emitting Opened so sends triggered by it succeed
    state.send_replace(LinkState::Open);
    tracing::info!(%endpoint, "link open");
    if events.send(TransportEvent::Opened).await.is_err() {
        return;
    }

    let (mut sink, mut stream) = socket.split();

    let terminal = loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if events.send(TransportEvent::PayloadReceived(text.to_string())).await.is_err() {
                        return;
                    }
                },
                Some(Ok(Message::Binary(bytes))) => match decode_text(&bytes) {
                    Ok(text) => {
                        if events.send(TransportEvent::PayloadReceived(text)).await.is_err() {
                            return;
                        }
                    },
                    Err(e) => tracing::debug!(error = %e, "dropping undecodable payload"),
                },
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(?frame, "close frame received");
                    break TransportEvent::Closed;
                },
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {},
                Some(Err(e)) => {
                    break TransportEvent::Errored {
                        reason: TransportError::Stream(e.to_string()).to_string(),
                    };
                },
                None => break TransportEvent::Closed,
            },

            queued = outbound.recv() => match queued {
                Some(text) => {
                    if let Err(e) = sink.send(Message::Text(text.into())).await {
                        break TransportEvent::Errored {
                            reason: TransportError::Stream(e.to_string()).to_string(),
                        };
                    }
                },
                // Handle dropped: nobody is listening anymore
                None => {
                    let _ = sink.close().await;
                    return;
                },
            },
        }
    };

    finish(&state, &events, terminal).await;
}

/// Publish the terminal state, then emit the terminal event.
async fn finish(
    state: &watch::Sender<LinkState>,
    events: &mpsc::Sender<TransportEvent>,
    event: TransportEvent,
) {
    let next = match &event {
        TransportEvent::Errored { reason } => {
            tracing::warn!(%reason, "link errored");
            LinkState::Errored
        },
        _ => {
            tracing::info!("link closed");
            LinkState::Closed
        },
    };

    state.send_replace(next);
    let _ = events.send(event).await;
}
