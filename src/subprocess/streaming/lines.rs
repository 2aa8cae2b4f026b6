//! Line splitting over a chunked byte stream

use std::collections::VecDeque;

use futures::stream::{self, Stream};
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::subprocess::ProcessError;

const READ_CHUNK_SIZE: usize = 4096;

pub type LineStreamItem = Result<String, ProcessError>;
pub type LineStream = Pin<Box<dyn Stream<Item = LineStreamItem> + Send>>;

/// Reassembles lines from arbitrarily chunked input.
///
/// Complete lines are returned as soon as their `\n` arrives; anything after
/// the last newline is held until more data or [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and collect every line it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        let mut rest = chunk;

        while let Some(pos) = rest.iter().position(|b| *b == b'\n') {
            self.pending.extend_from_slice(&rest[..pos]);
            lines.push(Self::take_line(&mut self.pending));
            rest = &rest[pos + 1..];
        }
        self.pending.extend_from_slice(rest);

        lines
    }

    /// Flush the trailing partial line at end of stream, if there is one.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(Self::take_line(&mut self.pending))
        }
    }

    /// Bytes received after the last newline.
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    fn take_line(pending: &mut Vec<u8>) -> String {
        if pending.last() == Some(&b'\r') {
            pending.pop();
        }
        let line = String::from_utf8_lossy(pending).into_owned();
        pending.clear();
        line
    }
}

struct LineReader<R> {
    reader: R,
    splitter: LineSplitter,
    ready: VecDeque<String>,
    eof: bool,
}

/// Turn an async byte source into a stream of lines.
///
/// The stream ends after the source reports EOF and the final partial line
/// (if any) has been yielded. A read error is yielded once and ends the
/// stream.
pub fn line_stream<R>(reader: R) -> LineStream
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let state = LineReader {
        reader,
        splitter: LineSplitter::new(),
        ready: VecDeque::new(),
        eof: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            if let Some(line) = state.ready.pop_front() {
                return Some((Ok(line), state));
            }
            if state.eof {
                return None;
            }

            match state.reader.read(&mut chunk).await {
                Ok(0) => {
                    state.eof = true;
                    if let Some(line) = state.splitter.finish() {
                        state.ready.push_back(line);
                    }
                }
                Ok(n) => state.ready.extend(state.splitter.push(&chunk[..n])),
                Err(e) => {
                    state.eof = true;
                    return Some((Err(ProcessError::Io(e)), state));
                }
            }
        }
    }))
}
