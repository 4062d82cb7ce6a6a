// Copyright 2025 the Car Monitor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame link: the TCP socket a camera bridge pushes raw frame bytes into.
//!
//! The kiosk listens on a fixed port and waits, up to a timeout, for a single
//! client before the navigation loop starts. After that the socket is drained
//! between ticks without blocking. The bytes are counted and optionally the
//! first chunk is written to disk; nothing decodes them.

use std::io::{self, Read};
use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

const ACCEPT_POLL: Duration = Duration::from_millis(10);
const READ_CHUNK: usize = 16 * 1024;

/// The frame link could not be established.
#[derive(Debug, thiserror::Error)]
pub(crate) enum LinkError {
    /// Listening socket could not be opened.
    #[error("cannot listen on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },
    /// No client connected in time.
    #[error("no client connected within {0:?}")]
    Timeout(Duration),
    /// Socket error while accepting.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A connected frame source.
#[derive(Debug)]
pub(crate) struct FrameLink {
    stream: TcpStream,
    peer: SocketAddr,
    received: u64,
    closed: bool,
    dump_path: Option<PathBuf>,
    buf: Box<[u8]>,
}

impl FrameLink {
    /// Listen on `port` on all interfaces and wait for one client.
    pub(crate) fn listen(
        port: u16,
        timeout: Duration,
        dump_path: Option<PathBuf>,
    ) -> Result<Self, LinkError> {
        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
            .map_err(|source| LinkError::Bind { port, source })?;
        info!(port, ?timeout, "waiting for frame source");
        Self::accept(&listener, timeout, dump_path)
    }

    /// Wait on an already bound listener.
    pub(crate) fn accept(
        listener: &TcpListener,
        timeout: Duration,
        dump_path: Option<PathBuf>,
    ) -> Result<Self, LinkError> {
        listener.set_nonblocking(true)?;
        let deadline = Instant::now() + timeout;
        loop {
            match listener.accept() {
                Ok((stream, peer)) => {
                    stream.set_nonblocking(true)?;
                    info!(%peer, "frame source connected");
                    return Ok(Self {
                        stream,
                        peer,
                        received: 0,
                        closed: false,
                        dump_path,
                        buf: vec![0_u8; READ_CHUNK].into_boxed_slice(),
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    if Instant::now() >= deadline {
                        return Err(LinkError::Timeout(timeout));
                    }
                    thread::sleep(ACCEPT_POLL);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Total bytes read so far.
    pub(crate) fn received(&self) -> u64 {
        self.received
    }

    /// Whether the peer has hung up or the socket failed.
    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    /// Read whatever is pending without blocking; returns the bytes read.
    ///
    /// A read error closes the link; bytes counted so far are kept.
    pub(crate) fn drain(&mut self) -> io::Result<usize> {
        if self.closed {
            return Ok(0);
        }
        let mut total = 0;
        loop {
            match self.stream.read(&mut self.buf) {
                Ok(0) => {
                    info!(peer = %self.peer, received = self.received + total as u64, "frame source closed");
                    self.closed = true;
                    break;
                }
                Ok(n) => {
                    if self.received == 0 && total == 0 {
                        self.dump_first_chunk(&self.buf[..n]);
                    }
                    total += n;
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.closed = true;
                    self.received += total as u64;
                    return Err(e);
                }
            }
        }
        if total > 0 {
            debug!(bytes = total, "frame data received");
        }
        self.received += total as u64;
        Ok(total)
    }

    fn dump_first_chunk(&self, chunk: &[u8]) {
        let Some(path) = &self.dump_path else {
            return;
        };
        match std::fs::write(path, chunk) {
            Ok(()) => info!(path = %path.display(), bytes = chunk.len(), "first frame chunk saved"),
            Err(e) => warn!(path = %path.display(), error = %e, "could not save frame chunk"),
        }
    }
}
