use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use super::error::ProcessError;
use super::runner::{ExitStatus, ProcessCommand, ProcessRunner};
use super::streaming::UiOutput;

/// Scripted [`ProcessRunner`] for tests: replays canned output and exit
/// statuses and records every command it was asked to run.
#[derive(Clone, Default)]
pub struct MockProcessRunner {
    expectations: Arc<Mutex<Vec<MockExpectation>>>,
    call_history: Arc<Mutex<Vec<ProcessCommand>>>,
}

struct MockExpectation {
    program: String,
    #[allow(clippy::type_complexity)]
    args_matcher: Option<Box<dyn Fn(&[String]) -> bool + Send + Sync>>,
    output: Vec<String>,
    status: ExitStatus,
    times_called: usize,
    expected_times: Option<usize>,
}

pub struct MockCommandConfig {
    runner: MockProcessRunner,
    expectation: MockExpectation,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_command(&self, program: &str) -> MockCommandConfig {
        MockCommandConfig {
            runner: self.clone(),
            expectation: MockExpectation {
                program: program.to_string(),
                args_matcher: None,
                output: Vec::new(),
                status: ExitStatus::Success,
                times_called: 0,
                expected_times: None,
            },
        }
    }

    pub fn verify_called(&self, program: &str, times: usize) -> bool {
        let history = lock(&self.call_history);
        let count = history.iter().filter(|cmd| cmd.program == program).count();
        count == times
    }

    pub fn get_call_history(&self) -> Vec<ProcessCommand> {
        lock(&self.call_history).clone()
    }

    pub fn reset(&self) {
        lock(&self.expectations).clear();
        lock(&self.call_history).clear();
    }

    /// Find the matching expectation and return its scripted output and status
    fn respond(&self, command: &ProcessCommand) -> Result<(Vec<String>, ExitStatus), ProcessError> {
        let mut expectations = lock(&self.expectations);

        for expectation in expectations.iter_mut() {
            if expectation.program != command.program {
                continue;
            }

            if let Some(ref args_matcher) = expectation.args_matcher {
                if !(args_matcher)(&command.args) {
                    continue;
                }
            }

            expectation.times_called += 1;

            if let Some(expected) = expectation.expected_times {
                if expectation.times_called > expected {
                    return Err(ProcessError::MockExpectationNotMet(format!(
                        "Command '{}' called {} times, expected {}",
                        command.program, expectation.times_called, expected
                    )));
                }
            }

            return Ok((expectation.output.clone(), expectation.status.clone()));
        }

        Err(ProcessError::MockExpectationNotMet(format!(
            "No expectation found for command: {} {:?}",
            command.program, command.args
        )))
    }
}

#[async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn run(
        &self,
        command: ProcessCommand,
        output: Arc<dyn UiOutput>,
    ) -> Result<(), ProcessError> {
        lock(&self.call_history).push(command.clone());

        let (lines, status) = self.respond(&command)?;
        for line in &lines {
            if let Err(e) = output.output(line).await {
                tracing::warn!("Mock output sink failed: {}", e);
            }
        }

        if status.success() {
            Ok(())
        } else {
            Err(ProcessError::Execution {
                command: command.display(),
                status,
                output: lines.iter().map(|line| format!("{line}\n")).collect(),
            })
        }
    }
}

impl MockCommandConfig {
    pub fn with_args<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.expectation.args_matcher = Some(Box::new(matcher));
        self
    }

    /// Lines the mock writes to the output sink.
    pub fn returns_output<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expectation.output = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn returns_exit_code(mut self, code: i32) -> Self {
        self.expectation.status = if code == 0 {
            ExitStatus::Success
        } else {
            ExitStatus::Error(code)
        };
        self
    }

    pub fn returns_success(mut self) -> Self {
        self.expectation.status = ExitStatus::Success;
        self
    }

    pub fn times(mut self, n: usize) -> Self {
        self.expectation.expected_times = Some(n);
        self
    }

    pub fn finish(self) {
        lock(&self.runner.expectations).push(self.expectation);
    }
}
