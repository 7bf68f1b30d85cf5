//! Websocket session for one room.
//!
//! The connection is split after the subscribe handshake. The write half
//! stays in [`Session`] and is only touched by the caller (sends and the
//! closing frame), so writes are serialized by `&mut self`. The read half
//! moves into a spawned task that pushes frames into a bounded FIFO queue;
//! the caller drains it through [`Events`] without ever blocking on socket
//! reads itself.

use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use futures::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use parlor_proto::{Command, RawFrame, RoomId};
use tokio::{
    net::TcpStream,
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{
        Message, Utf8Bytes,
        client::IntoClientRequest,
        http::{HeaderValue, header::AUTHORIZATION},
        protocol::{CloseFrame, frame::coding::CloseCode},
    },
};

use crate::{ConnectionError, ReadError, SendError, TransportConfig};

/// Capacity of the inbound frame queue.
const EVENT_QUEUE_CAPACITY: usize = 256;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No connection attempted.
    Disconnected,
    /// Dialing and subscribing.
    Connecting,
    /// Subscribed; sends and event consumption are permitted.
    Subscribed,
    /// Interrupted or broken; teardown in progress.
    Closing,
    /// Terminal. No transition back to `Connecting`.
    Closed,
}

#[derive(Debug)]
struct Shared {
    state: SessionState,
    read_error: Option<ReadError>,
}

/// State shared between the session handle and its read task.
#[derive(Debug, Clone)]
struct SharedState(Arc<Mutex<Shared>>);

impl SharedState {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Shared { state: SessionState::Connecting, read_error: None })))
    }

    fn with<R>(&self, f: impl FnOnce(&mut Shared) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    fn state(&self) -> SessionState {
        self.with(|s| s.state)
    }

    fn set(&self, state: SessionState) {
        self.with(|s| {
            tracing::debug!(from = ?s.state, to = ?state, "session state");
            s.state = state;
        });
    }

    /// Move to `Closing` unless already closing or closed.
    fn begin_closing(&self) {
        self.with(|s| {
            if matches!(s.state, SessionState::Connecting | SessionState::Subscribed) {
                tracing::debug!(from = ?s.state, "session closing");
                s.state = SessionState::Closing;
            }
        });
    }

    fn record_read_error(&self, error: ReadError) {
        self.with(|s| {
            if s.read_error.is_none() {
                s.read_error = Some(error);
            }
        });
    }

    fn read_error(&self) -> Option<ReadError> {
        self.with(|s| s.read_error.clone())
    }
}

/// Inbound frame queue of a session.
///
/// Yields frames in arrival order. Ends (`None`) when the peer closes, a
/// read fails, or the session is closed. Cannot be restarted.
#[derive(Debug)]
pub struct Events {
    frames: mpsc::Receiver<RawFrame>,
}

impl Events {
    /// Wait for the next frame. `None` marks end-of-sequence.
    pub async fn next(&mut self) -> Option<RawFrame> {
        self.frames.recv().await
    }
}

/// A live subscription to one room.
///
/// Exactly one per active room. Dropping it stops the read task.
pub struct Session {
    room: RoomId,
    shared: SharedState,
    sink: Option<SplitSink<WsStream, Message>>,
    events: Option<Events>,
    shutdown: Option<oneshot::Sender<()>>,
    reader: Option<JoinHandle<()>>,
}

impl Session {
    /// Dial the server, subscribe to `room`, and start reading.
    ///
    /// The token is sent verbatim as the `Authorization` header. The
    /// subscribe frame is written exactly once, before this returns, so no
    /// send or event consumption can precede it.
    pub async fn connect(
        config: &TransportConfig,
        room: RoomId,
        token: &str,
    ) -> Result<Self, ConnectionError> {
        let shared = SharedState::new();
        let url = config.socket_url();
        tracing::info!(%url, %room, "connecting");

        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|e| ConnectionError::InvalidUrl(e.to_string()))?;
        let auth = HeaderValue::from_str(token).map_err(|_| ConnectionError::InvalidToken)?;
        request.headers_mut().insert(AUTHORIZATION, auth);

        let (stream, _response) =
            connect_async(request).await.map_err(|e| ConnectionError::Dial(e.to_string()))?;
        let (mut sink, stream) = stream.split();

        let subscribe = Command::Subscribe { room: room.clone() }.encode()?;
        sink.send(Message::text(subscribe))
            .await
            .map_err(|e| ConnectionError::Handshake(e.to_string()))?;

        // Subscribed before the reader runs, so a peer close it observes
        // right away is not overwritten.
        shared.set(SessionState::Subscribed);
        tracing::info!(%room, "subscribed");

        let (frames_tx, frames_rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let reader = tokio::spawn(read_loop(stream, frames_tx, shutdown_rx, shared.clone()));

        Ok(Self {
            room,
            shared,
            sink: Some(sink),
            events: Some(Events { frames: frames_rx }),
            shutdown: Some(shutdown_tx),
            reader: Some(reader),
        })
    }

    /// Room this session is subscribed to.
    pub fn room(&self) -> &RoomId {
        &self.room
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.shared.state()
    }

    /// Why the inbound stream ended, if it ended on its own.
    pub fn read_error(&self) -> Option<ReadError> {
        self.shared.read_error()
    }

    /// Take the inbound event queue.
    ///
    /// Returns `None` on every call after the first, and when the session is
    /// not subscribed.
    pub fn take_events(&mut self) -> Option<Events> {
        if self.state() != SessionState::Subscribed {
            return None;
        }
        self.events.take()
    }

    /// Post `content` to the session's room.
    ///
    /// A write failure stops the read task, moves the session to `Closing`,
    /// and is returned as [`SendError::Write`]. It is never fatal.
    pub async fn send(&mut self, content: &str) -> Result<(), SendError> {
        let state = self.state();
        if state != SessionState::Subscribed {
            return Err(SendError::NotSubscribed { state });
        }
        let Some(sink) = self.sink.as_mut() else {
            return Err(SendError::NotSubscribed { state });
        };

        let frame = Command::Message { room: self.room.clone(), content: content.to_string() }
            .encode()?;

        if let Err(e) = sink.send(Message::text(frame)).await {
            tracing::warn!(room = %self.room, error = %e, "send failed");
            self.shared.record_read_error(ReadError::Transport(e.to_string()));
            self.shared.begin_closing();
            self.stop_reader();
            return Err(SendError::Write(e.to_string()));
        }

        tracing::debug!(room = %self.room, len = content.len(), "message sent");
        Ok(())
    }

    /// Close the session.
    ///
    /// Writes a normal-closure frame best-effort, stops the read task (which
    /// ends [`Events`]), and releases the connection. Idempotent.
    pub async fn close(&mut self) {
        if self.state() == SessionState::Closed {
            return;
        }
        self.shared.begin_closing();

        if let Some(mut sink) = self.sink.take() {
            let frame = CloseFrame { code: CloseCode::Normal, reason: Utf8Bytes::from_static("") };
            if let Err(e) = sink.send(Message::Close(Some(frame))).await {
                tracing::debug!(error = %e, "close frame not delivered");
            }
        }

        self.stop_reader();
        self.shared.set(SessionState::Closed);
        tracing::info!(room = %self.room, "session closed");
    }

    fn stop_reader(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        // Detach; the task exits on its own once it sees the shutdown signal.
        drop(self.reader.take());
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

/// Forward inbound frames until close, error, or shutdown.
///
/// Returning drops `frames`, which ends the consumer's [`Events`].
async fn read_loop(
    mut stream: SplitStream<WsStream>,
    frames: mpsc::Sender<RawFrame>,
    mut shutdown: oneshot::Receiver<()>,
    shared: SharedState,
) {
    loop {
        let message = tokio::select! {
            biased;

            _ = &mut shutdown => {
                tracing::debug!("read task stopped");
                return;
            }

            message = stream.next() => message,
        };

        let frame = match message {
            Some(Ok(Message::Text(text))) => {
                RawFrame::new(Bytes::copy_from_slice(text.as_str().as_bytes()))
            },
            Some(Ok(Message::Binary(bytes))) => RawFrame::new(bytes),
            Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
            Some(Ok(Message::Close(close))) => {
                let reason = close
                    .map(|c| c.reason.as_str().to_string())
                    .filter(|r| !r.is_empty());
                tracing::info!(?reason, "server closed connection");
                shared.record_read_error(ReadError::PeerClosed { reason });
                break;
            },
            Some(Err(e)) => {
                tracing::warn!(error = %e, "read failed");
                shared.record_read_error(ReadError::Transport(e.to_string()));
                break;
            },
            None => {
                tracing::info!("connection ended");
                shared.record_read_error(ReadError::PeerClosed { reason: None });
                break;
            },
        };

        if frames.send(frame).await.is_err() {
            tracing::debug!("event queue dropped, stopping read task");
            break;
        }
    }

    shared.begin_closing();
}
