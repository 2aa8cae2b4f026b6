use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncRead;
use tokio::process::Child;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::error::ProcessError;
use super::streaming::{line_stream, pump, OutputRelay, RingBuffer, TeeWriter, UiOutput};

/// How much combined output is kept for error reports. Bounds memory use when
/// a faulty process produces unbounded output.
pub const MAX_OUTPUT_TAIL: usize = 8 * 1024;

/// In-memory pipe between the output pump and the relay.
const PIPE_CAPACITY: usize = 64 * 1024;

/// Read end of the pipe the child writes both stdout and stderr to.
type CombinedOutput = Box<dyn AsyncRead + Send + Unpin>;

/// Fully resolved description of one subprocess launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Overlaid on the inherited environment; these win on collision.
    pub env: HashMap<String, String>,
    /// `None` inherits the current directory.
    pub working_dir: Option<PathBuf>,
}

impl ProcessCommand {
    /// Shell-like rendering, `KEY=value program args...`, with env keys sorted.
    pub fn display(&self) -> String {
        let mut env: Vec<_> = self.env.iter().collect();
        env.sort();

        let mut parts: Vec<String> = env.into_iter().map(|(k, v)| format!("{k}={v}")).collect();
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error(i32),
    Signal(i32),
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        matches!(self, ExitStatus::Success)
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            ExitStatus::Success => Some(0),
            ExitStatus::Error(code) => Some(*code),
            ExitStatus::Signal(_) => None,
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Success => write!(f, "exit status 0"),
            ExitStatus::Error(code) => write!(f, "exit status {code}"),
            ExitStatus::Signal(signal) => write!(f, "terminated by signal {signal}"),
        }
    }
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` to completion, relaying each output line to `output`.
    async fn run(
        &self,
        command: ProcessCommand,
        output: Arc<dyn UiOutput>,
    ) -> Result<(), ProcessError>;
}

pub struct TokioProcessRunner {
    tail_capacity: NonZeroUsize,
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self {
            tail_capacity: NonZeroUsize::new(MAX_OUTPUT_TAIL).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `capacity` bytes of output for error reports instead of the default.
    pub fn with_tail_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.tail_capacity = capacity;
        self
    }

    /// Log command execution details
    fn log_command_start(command: &ProcessCommand) {
        tracing::debug!(
            "Executing subprocess: {} {}",
            command.program,
            command.args.join(" ")
        );

        if !command.env.is_empty() {
            tracing::debug!(
                "Environment overlay count: {}, total size: {} bytes",
                command.env.len(),
                command
                    .env
                    .iter()
                    .map(|(k, v)| k.len() + v.len() + 2)
                    .sum::<usize>()
            );
            tracing::trace!("Environment overlay: {:?}", command.env);
        }

        if let Some(ref dir) = command.working_dir {
            tracing::trace!("Working directory: {:?}", dir);
        }
    }

    /// Configure the command with environment, working directory and stdin
    fn configure_command(command: &ProcessCommand) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args);

        // The inherited environment is kept; the overlay takes precedence
        for (key, value) in &command.env {
            cmd.env(key, value);
        }

        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null());
        cmd
    }

    /// Create the pipe shared by stdout and stderr. Both streams write to the
    /// same pipe so the combined output keeps the order it was produced in.
    #[cfg(unix)]
    fn combined_output_pipe() -> std::io::Result<(CombinedOutput, std::io::PipeWriter)> {
        let (reader, writer) = std::io::pipe()?;
        let reader = tokio::net::unix::pipe::Receiver::from_owned_fd(reader.into())?;
        Ok((Box::new(reader), writer))
    }

    #[cfg(not(unix))]
    fn combined_output_pipe() -> std::io::Result<(CombinedOutput, std::io::PipeWriter)> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "combined output pipe is only available on unix",
        ))
    }

    /// Spawn the child with stdout and stderr both attached to one pipe.
    fn spawn_child(command: &ProcessCommand) -> Result<(Child, CombinedOutput), ProcessError> {
        let (reader, writer) = Self::combined_output_pipe()?;

        let mut cmd = Self::configure_command(command);
        cmd.stdout(writer.try_clone()?);
        cmd.stderr(writer);

        let child = cmd
            .spawn()
            .map_err(|e| Self::map_spawn_error(e, command))?;
        // Dropping `cmd` closes our copies of the write end, so the reader
        // sees end of stream once the child and its descendants exit.
        drop(cmd);
        Ok((child, reader))
    }

    /// Convert process exit status to our ExitStatus enum
    fn parse_exit_status(status: std::process::ExitStatus) -> ExitStatus {
        if status.success() {
            ExitStatus::Success
        } else if let Some(code) = status.code() {
            ExitStatus::Error(code)
        } else {
            Self::parse_signal_status(status)
        }
    }

    /// Parse signal status on Unix systems
    #[cfg(unix)]
    fn parse_signal_status(status: std::process::ExitStatus) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            ExitStatus::Signal(signal)
        } else {
            ExitStatus::Error(1)
        }
    }

    #[cfg(not(unix))]
    fn parse_signal_status(_status: std::process::ExitStatus) -> ExitStatus {
        ExitStatus::Error(1)
    }

    /// Map spawn error to ProcessError
    fn map_spawn_error(error: std::io::Error, command: &ProcessCommand) -> ProcessError {
        tracing::error!(
            "Failed to spawn '{}': {:?} (kind: {:?})",
            command.program,
            error,
            error.kind()
        );

        if error.kind() == std::io::ErrorKind::NotFound {
            ProcessError::CommandNotFound(command.program.clone())
        } else {
            ProcessError::SpawnFailed {
                command: command.display(),
                source: error,
            }
        }
    }

    /// Log the process execution result
    fn log_result(status: &ExitStatus, duration: Duration, lines: usize, command: &ProcessCommand) {
        match status {
            ExitStatus::Success => {
                tracing::debug!(
                    "Subprocess completed successfully in {:?} ({} lines): {}",
                    duration,
                    lines,
                    command.program
                );
            }
            ExitStatus::Error(code) => {
                tracing::debug!(
                    "Subprocess failed with exit code {} in {:?}: {}",
                    code,
                    duration,
                    command.program
                );
            }
            ExitStatus::Signal(signal) => {
                tracing::warn!(
                    "Subprocess terminated by signal {} in {:?}: {}",
                    signal,
                    duration,
                    command.program
                );
            }
        }
    }

    /// Join the output pump. Read failures are logged; the exit status decides the outcome.
    async fn join_pump(handle: JoinHandle<std::io::Result<u64>>) {
        match handle.await {
            Ok(Ok(bytes)) => tracing::trace!("Captured {} bytes of subprocess output", bytes),
            Ok(Err(e)) => tracing::warn!("Failed reading subprocess output: {}", e),
            Err(e) => tracing::warn!("Output pump task failed: {}", e),
        }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(
        &self,
        command: ProcessCommand,
        output: Arc<dyn UiOutput>,
    ) -> Result<(), ProcessError> {
        super::ensure_supported_platform()?;

        let start = Instant::now();
        Self::log_command_start(&command);

        let (pipe_writer, pipe_reader) = tokio::io::duplex(PIPE_CAPACITY);
        let relay = OutputRelay::spawn(line_stream(pipe_reader), output);
        let tee = Arc::new(Mutex::new(TeeWriter::new(
            RingBuffer::with_capacity(self.tail_capacity),
            pipe_writer,
        )));

        let (mut child, combined) = match Self::spawn_child(&command) {
            Ok(spawned) => spawned,
            Err(e) => {
                // Let the relay see end of stream so its task ends with us
                tee.lock().await.close().await;
                relay.wait().await;
                return Err(e);
            }
        };

        let output_pump = tokio::spawn(pump(combined, Arc::clone(&tee)));

        let waited = child.wait().await;
        Self::join_pump(output_pump).await;

        // Closing the pipe is what lets the relay finish
        let (tail, pipe_error) = {
            let mut tee = tee.lock().await;
            tee.close().await;
            (tee.tail().snapshot_lossy(), tee.take_pipe_error())
        };
        let lines = relay.wait().await;

        let status = Self::parse_exit_status(waited?);
        Self::log_result(&status, start.elapsed(), lines, &command);

        match status {
            ExitStatus::Success => match pipe_error {
                Some(e) => Err(ProcessError::Io(e)),
                None => Ok(()),
            },
            status => Err(ProcessError::Execution {
                command: command.display(),
                status,
                output: tail,
            }),
        }
    }
}
