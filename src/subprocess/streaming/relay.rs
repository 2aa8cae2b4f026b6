//! Relay task that forwards output lines to a sink

use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::lines::LineStream;
use super::output::UiOutput;

/// Ferries lines from a [`LineStream`] to a [`UiOutput`] on its own task.
pub struct OutputRelay;

/// Handle to a running relay; await [`RelayHandle::wait`] to join it.
pub struct RelayHandle {
    done: oneshot::Receiver<usize>,
    task: JoinHandle<()>,
}

impl OutputRelay {
    /// Start relaying `source` into `sink` on a new tokio task.
    pub fn spawn(source: LineStream, sink: Arc<dyn UiOutput>) -> RelayHandle {
        let (done_tx, done_rx) = oneshot::channel();
        let task = tokio::spawn(Self::run(source, sink, done_tx));
        RelayHandle {
            done: done_rx,
            task,
        }
    }

    /// Forward every line until the source ends, then send the line count on `done`.
    ///
    /// Sink failures are logged and skipped. A read error ends the relay
    /// early; completion is still signalled.
    pub async fn run(mut source: LineStream, sink: Arc<dyn UiOutput>, done: oneshot::Sender<usize>) {
        let mut lines = 0usize;

        while let Some(item) = source.next().await {
            match item {
                Ok(line) => {
                    lines += 1;
                    if let Err(e) = sink.output(&line).await {
                        tracing::warn!("Output sink failed to accept line {}: {}", lines, e);
                    }
                }
                Err(e) => {
                    tracing::warn!("Stopped relaying output after read error: {}", e);
                    break;
                }
            }
        }

        tracing::trace!("Output relay finished after {} lines", lines);
        // The waiter may already be gone; nothing to do then
        let _ = done.send(lines);
    }
}

impl RelayHandle {
    /// Wait for the relay to drain its source. Returns the number of lines relayed.
    pub async fn wait(self) -> usize {
        match self.done.await {
            Ok(lines) => lines,
            Err(_) => {
                // Sender dropped without signalling: the task panicked
                if let Err(e) = self.task.await {
                    tracing::error!("Output relay task failed: {}", e);
                }
                0
            }
        }
    }
}
