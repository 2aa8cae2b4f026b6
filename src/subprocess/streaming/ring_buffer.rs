//! Fixed-capacity byte buffer that keeps only the most recent output

use std::io;
use std::num::NonZeroUsize;

/// Retains the last `capacity` bytes written to it.
///
/// Older bytes are overwritten as new ones arrive; overflow is never an
/// error. The buffer has no internal locking and is not safe for concurrent
/// writers. Callers that feed it from several tasks must serialize access
/// themselves (see [`TeeWriter`](super::tee::TeeWriter)).
#[derive(Debug, Clone)]
pub struct RingBuffer {
    data: Vec<u8>,
    written: u64,
}

impl RingBuffer {
    /// Create a buffer holding at most `capacity` bytes.
    ///
    /// Returns `None` for a zero capacity.
    pub fn new(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(Self::with_capacity)
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            data: vec![0; capacity.get()],
            written: 0,
        }
    }

    /// Append `buf`, dropping the oldest bytes if needed. Always returns `buf.len()`.
    pub fn write(&mut self, buf: &[u8]) -> usize {
        let n = buf.len();
        let size = self.data.len();

        // Only the tail of an oversized write can survive
        let (tail, skipped) = if n > size {
            (&buf[n - size..], n - size)
        } else {
            (buf, 0)
        };
        self.written += skipped as u64;

        let start = (self.written % size as u64) as usize;
        let first = tail.len().min(size - start);
        self.data[start..start + first].copy_from_slice(&tail[..first]);
        self.data[..tail.len() - first].copy_from_slice(&tail[first..]);
        self.written += tail.len() as u64;

        n
    }

    /// The retained bytes, oldest first.
    pub fn snapshot(&self) -> Vec<u8> {
        let size = self.data.len();
        if self.written <= size as u64 {
            return self.data[..self.written as usize].to_vec();
        }

        let wrap = (self.written % size as u64) as usize;
        let mut out = Vec::with_capacity(size);
        out.extend_from_slice(&self.data[wrap..]);
        out.extend_from_slice(&self.data[..wrap]);
        out
    }

    /// The retained bytes as text, for error messages.
    ///
    /// A multi-byte character cut in half by the wrap point is dropped rather
    /// than rendered as a replacement character.
    pub fn snapshot_lossy(&self) -> String {
        let bytes = self.snapshot();
        let skip = if self.written > self.data.len() as u64 {
            bytes
                .iter()
                .take(3)
                .take_while(|b| (**b & 0xC0) == 0x80)
                .count()
        } else {
            0
        };
        String::from_utf8_lossy(&bytes[skip..]).into_owned()
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of bytes currently retrievable.
    pub fn len(&self) -> usize {
        self.written.min(self.data.len() as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Total bytes ever written, including those since discarded.
    pub fn total_written(&self) -> u64 {
        self.written
    }
}

impl io::Write for RingBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(RingBuffer::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
