//! Real-time streaming infrastructure for subprocess output
//!
//! The child writes stdout and stderr to one OS pipe, so the combined output
//! keeps the order it was produced in. That output is fanned out into a
//! bounded tail (kept for error reports) and an in-memory pipe. A relay task
//! splits the in-memory pipe into lines and hands each one to a [`UiOutput`]
//! as soon as it is complete.
//!
//! ```text
//!  stdout ─┐                          ┌─▶ RingBuffer (last 8 KiB)
//!          ├─▶ OS pipe ─▶ TeeWriter ──┤
//!  stderr ─┘                          └─▶ pipe ─▶ LineSplitter ─▶ OutputRelay ─▶ UiOutput
//! ```

pub mod lines;
pub mod output;
pub mod relay;
pub mod ring_buffer;
pub mod tee;

pub use lines::{line_stream, LineSplitter, LineStream};
pub use output::{CollectingOutput, LoggingOutput, StdoutOutput, UiOutput};
pub use relay::{OutputRelay, RelayHandle};
pub use ring_buffer::RingBuffer;
pub use tee::{pump, TeeWriter};
