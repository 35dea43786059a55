// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! WebSocket Transport
//!
//! Push transport over tungstenite. Supports both native-tls and rustls TLS
//! backends.

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

#[cfg(all(feature = "network-native-tls", not(feature = "network-rustls")))]
use native_tls::TlsConnector;

#[cfg(feature = "network-rustls")]
use rustls::pki_types::ServerName;
#[cfg(feature = "network-rustls")]
use std::sync::Arc;

use tracing::debug;
use tungstenite::client::IntoClientRequest;
use tungstenite::http::header::{HeaderValue, COOKIE};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use super::error::NetworkError;
use super::transport::{PushTransport, RawFrame, TransportConfig, TransportResult};

/// WebSocket push transport.
///
/// Supports ws:// (plaintext) and wss:// (TLS). The session cookie from the
/// config is sent on the upgrade request. Each text message is one frame.
///
/// # Example
///
/// ```ignore
/// use notice_core::network::{PushTransport, TransportConfig, WebSocketTransport};
///
/// let mut transport = WebSocketTransport::new();
/// let config = TransportConfig::new("wss://api.example.com/notifications/stream")
///     .with_session_cookie("session=abc123");
/// transport.open(&config)?;
/// ```
pub struct WebSocketTransport {
    socket: Option<WebSocket<MaybeTlsStream<TcpStream>>>,
}

impl WebSocketTransport {
    /// Creates a closed WebSocket transport.
    pub fn new() -> Self {
        WebSocketTransport { socket: None }
    }

    /// Returns true while a socket is held.
    pub fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    /// Parses a WebSocket URL into host, port and TLS flag.
    fn parse_url(url: &str) -> Result<(String, u16, bool), NetworkError> {
        let is_tls = url.starts_with("wss://");
        let url_without_scheme = url
            .strip_prefix("wss://")
            .or_else(|| url.strip_prefix("ws://"))
            .ok_or_else(|| {
                NetworkError::InvalidUrl(format!("expected ws:// or wss://, got {}", url))
            })?;

        let host_port = url_without_scheme
            .split('/')
            .next()
            .unwrap_or(url_without_scheme);

        if host_port.is_empty() {
            return Err(NetworkError::InvalidUrl(format!("missing host in {}", url)));
        }

        let (host, port) = if let Some(colon_pos) = host_port.rfind(':') {
            let host = &host_port[..colon_pos];
            let port_str = &host_port[colon_pos + 1..];
            let port: u16 = port_str
                .parse()
                .map_err(|_| NetworkError::InvalidUrl(format!("invalid port: {}", port_str)))?;
            (host.to_string(), port)
        } else {
            let default_port = if is_tls { 443 } else { 80 };
            (host_port.to_string(), default_port)
        };

        Ok((host, port, is_tls))
    }

    fn connect_tcp(host: &str, port: u16, timeout: Duration) -> Result<TcpStream, NetworkError> {
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|e| NetworkError::ConnectionFailed(format!("resolve {}: {}", host, e)))?
            .collect();

        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_error = Some(e),
            }
        }

        Err(NetworkError::ConnectionFailed(match last_error {
            Some(e) => e.to_string(),
            None => format!("no addresses for {}", host),
        }))
    }

    /// Create a TLS stream using native-tls
    #[cfg(all(feature = "network-native-tls", not(feature = "network-rustls")))]
    fn create_tls_stream(
        host: &str,
        tcp_stream: TcpStream,
    ) -> Result<MaybeTlsStream<TcpStream>, NetworkError> {
        let connector = TlsConnector::new()
            .map_err(|e| NetworkError::ConnectionFailed(format!("TLS error: {}", e)))?;
        let tls_stream = connector
            .connect(host, tcp_stream)
            .map_err(|e| NetworkError::ConnectionFailed(format!("TLS handshake failed: {}", e)))?;
        Ok(MaybeTlsStream::NativeTls(tls_stream))
    }

    /// Create a TLS stream using rustls
    #[cfg(feature = "network-rustls")]
    fn create_tls_stream(
        host: &str,
        tcp_stream: TcpStream,
    ) -> Result<MaybeTlsStream<TcpStream>, NetworkError> {
        let mut root_store = rustls::RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let server_name: ServerName<'_> = host.try_into().map_err(|_| {
            NetworkError::ConnectionFailed(format!("Invalid server name: {}", host))
        })?;

        let tls_conn = rustls::ClientConnection::new(Arc::new(config), server_name.to_owned())
            .map_err(|e| NetworkError::ConnectionFailed(format!("TLS setup failed: {}", e)))?;

        let tls_stream = rustls::StreamOwned::new(tls_conn, tcp_stream);
        Ok(MaybeTlsStream::Rustls(tls_stream))
    }
}

impl Default for WebSocketTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl PushTransport for WebSocketTransport {
    fn open(&mut self, config: &TransportConfig) -> TransportResult<()> {
        if self.socket.is_some() {
            return Ok(());
        }

        let (host, port, is_tls) = Self::parse_url(&config.stream_url)?;

        let tcp_stream =
            Self::connect_tcp(&host, port, Duration::from_millis(config.connect_timeout_ms))?;

        // Short read timeout keeps poll_frame from blocking the event loop.
        tcp_stream
            .set_read_timeout(Some(Duration::from_millis(config.io_timeout_ms.max(1))))
            .map_err(|e| NetworkError::ConnectionFailed(e.to_string()))?;
        tcp_stream
            .set_write_timeout(Some(Duration::from_millis(config.connect_timeout_ms)))
            .map_err(|e| NetworkError::ConnectionFailed(e.to_string()))?;

        let stream: MaybeTlsStream<TcpStream> = if is_tls {
            Self::create_tls_stream(&host, tcp_stream)?
        } else {
            MaybeTlsStream::Plain(tcp_stream)
        };

        let mut request = config
            .stream_url
            .as_str()
            .into_client_request()
            .map_err(|e| NetworkError::InvalidUrl(format!("invalid request: {}", e)))?;

        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| NetworkError::ConnectionFailed(format!("invalid cookie: {}", e)))?;
            request.headers_mut().insert(COOKIE, value);
        }

        let (socket, _response) = tungstenite::client(request, stream).map_err(|e| {
            NetworkError::ConnectionFailed(format!("WebSocket handshake failed: {}", e))
        })?;

        debug!(host = %host, port, tls = is_tls, "websocket upgraded");
        self.socket = Some(socket);
        Ok(())
    }

    fn close(&mut self) -> TransportResult<()> {
        if let Some(mut socket) = self.socket.take() {
            let _ = socket.close(None); // Ignore errors on close
        }
        Ok(())
    }

    fn poll_frame(&mut self) -> TransportResult<Option<RawFrame>> {
        let socket = self.socket.as_mut().ok_or(NetworkError::NotConnected)?;

        match socket.read() {
            Ok(Message::Text(text)) => Ok(Some(RawFrame::new(text))),
            Ok(Message::Binary(data)) => match String::from_utf8(data) {
                Ok(text) => Ok(Some(RawFrame::new(text))),
                // Hand it to the decoder anyway so the failure is logged there.
                Err(e) => Ok(Some(RawFrame::new(
                    String::from_utf8_lossy(e.as_bytes()).into_owned(),
                ))),
            },
            Ok(Message::Ping(data)) => {
                let _ = socket.send(Message::Pong(data));
                Ok(None)
            }
            Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => Ok(None),
            Ok(Message::Close(_)) => {
                self.socket = None;
                Err(NetworkError::ConnectionClosed)
            }
            Err(tungstenite::Error::Io(ref e))
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                Ok(None)
            }
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                self.socket = None;
                Err(NetworkError::ConnectionClosed)
            }
            Err(e) => {
                self.socket = None;
                Err(NetworkError::ReceiveFailed(e.to_string()))
            }
        }
    }
}
