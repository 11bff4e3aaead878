//! A single blocking TCP session.
//!
//! # Design
//! `Transport` owns at most one `TcpStream`. `connect` always starts a fresh
//! session, dropping any previous one first, so a closed stream is never
//! written to again. Reads run until the peer closes the connection, with
//! no timeout: a peer that never closes stalls `receive_all` indefinitely.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};

use crate::error::Error;

pub const DEFAULT_CHUNK_SIZE: usize = 1024;

#[derive(Debug)]
pub struct Transport {
    stream: Option<TcpStream>,
    chunk_size: usize,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl Transport {
    /// A closed transport that reads `chunk_size` bytes at a time.
    /// A zero chunk size is bumped to 1.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            stream: None,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    pub fn connect(&mut self, host: &str, port: u16) -> Result<(), Error> {
        self.close();
        tracing::debug!(host = %host, port, "connecting");
        let stream = TcpStream::connect((host, port)).map_err(|source| Error::Connection {
            host: host.to_string(),
            port,
            source,
        })?;
        self.stream = Some(stream);
        Ok(())
    }

    /// Write all of `data`. With no open session this logs and does nothing.
    pub fn send_all(&mut self, data: &str) -> Result<(), Error> {
        let Some(stream) = self.stream.as_mut() else {
            tracing::warn!(error = %Error::NotConnected, "send skipped");
            return Ok(());
        };
        stream.write_all(data.as_bytes())?;
        stream.flush()?;
        tracing::trace!(bytes = data.len(), "request sent");
        Ok(())
    }

    /// Read until the peer closes, then decode as UTF-8 (lossily).
    pub fn receive_all(&mut self) -> Result<String, Error> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;
        let mut buffer = Vec::new();
        let mut chunk = vec![0u8; self.chunk_size];
        let mut reads = 0usize;
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    reads += 1;
                    tracing::trace!(read = reads, bytes = n, "received chunk");
                    buffer.extend_from_slice(&chunk[..n]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        tracing::debug!(bytes = buffer.len(), reads, "peer closed connection");
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Release the socket. Safe on a closed or never-opened transport.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            // The peer may already have gone away.
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.close();
    }
}
