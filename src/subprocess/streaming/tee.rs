//! Fan-out of subprocess output into the diagnostic tail and the relay pipe

use std::io;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use super::ring_buffer::RingBuffer;

const PUMP_CHUNK_SIZE: usize = 8192;

/// Writes every chunk to both a [`RingBuffer`] and a pipe.
///
/// The ring buffer never fails. If the pipe fails it is dropped and the
/// error is kept; later chunks still reach the ring buffer so the child is
/// never blocked on a dead reader.
pub struct TeeWriter<W> {
    tail: RingBuffer,
    pipe: Option<W>,
    pipe_error: Option<io::Error>,
}

impl<W> TeeWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(tail: RingBuffer, pipe: W) -> Self {
        Self {
            tail,
            pipe: Some(pipe),
            pipe_error: None,
        }
    }

    pub async fn write_all(&mut self, chunk: &[u8]) {
        self.tail.write(chunk);

        if let Some(pipe) = self.pipe.as_mut() {
            if let Err(e) = pipe.write_all(chunk).await {
                tracing::warn!("Output pipe closed early, continuing with tail only: {}", e);
                self.pipe = None;
                self.pipe_error.get_or_insert(e);
            }
        }
    }

    /// Close the pipe so its reader sees end of stream. Idempotent.
    pub async fn close(&mut self) {
        if let Some(mut pipe) = self.pipe.take() {
            if let Err(e) = pipe.shutdown().await {
                tracing::debug!("Failed to shut down output pipe: {}", e);
            }
        }
    }

    pub fn tail(&self) -> &RingBuffer {
        &self.tail
    }

    /// First error the pipe reported, if any.
    pub fn take_pipe_error(&mut self) -> Option<io::Error> {
        self.pipe_error.take()
    }
}

/// Copy `reader` into the shared tee until EOF. Returns the bytes copied.
///
/// Each chunk is written under the lock, so chunks from concurrent pumps
/// never interleave inside one another.
pub async fn pump<R, W>(mut reader: R, tee: Arc<Mutex<TeeWriter<W>>>) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut chunk = vec![0u8; PUMP_CHUNK_SIZE];
    let mut copied = 0u64;

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(copied);
        }
        tee.lock().await.write_all(&chunk[..n]).await;
        copied += n as u64;
    }
}
