//! The engine boundary: matrix text in, coefficient text out.

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::EngineConfig;
use crate::error::EngineError;

/// A single-shot, synchronous Tutte engine.
///
/// `invoke` receives the serialized adjacency matrix and returns the engine's
/// complete standard output. Implementations must not retry.
pub trait EngineInvoker: Send + Sync {
    fn invoke(&self, input: &str) -> Result<String, EngineError>;
}

impl<F> EngineInvoker for F
where
    F: Fn(&str) -> Result<String, EngineError> + Send + Sync,
{
    fn invoke(&self, input: &str) -> Result<String, EngineError> {
        self(input)
    }
}

/// Runs the engine executable as a child process.
///
/// Input is written on a helper thread and stdin is closed afterwards to mark
/// end-of-input; stdout and stderr are drained on their own threads so a
/// chatty engine cannot fill a pipe and stall. The timeout covers the whole
/// call, including reading output after exit: if it elapses the child is
/// killed and reaped, and [`EngineError::Timeout`] is returned.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
    poll_interval: Duration,
}

impl ProcessEngine {
    /// Engine at `program` with the default 60 second timeout.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self::from_config(&EngineConfig::new(program))
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            timeout: config.timeout(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Set the per-invocation limit. `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Wait for exit, killing the child once the deadline passes.
    fn wait(
        &self,
        child: &mut Child,
        deadline: Option<Instant>,
    ) -> Result<ExitStatus, EngineError> {
        let Some(deadline) = deadline else {
            return Ok(child.wait()?);
        };
        loop {
            let polled = match child.try_wait() {
                Ok(polled) => polled,
                Err(e) => {
                    reap(child);
                    return Err(EngineError::Io(e));
                }
            };
            if let Some(status) = polled {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                tracing::warn!(timeout = ?self.timeout, "engine timed out, killing process");
                reap(child);
                return Err(self.timed_out());
            }
            thread::sleep(self.poll_interval);
        }
    }

    /// Receive a helper thread's result, giving up at the deadline.
    fn collect<T>(
        &self,
        rx: &Receiver<io::Result<T>>,
        deadline: Option<Instant>,
    ) -> Result<io::Result<T>, EngineError> {
        let received = match deadline {
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            Some(deadline) => {
                rx.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
        };
        match received {
            Ok(result) => Ok(result),
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    timeout = ?self.timeout,
                    "engine exited but its pipes are still open, giving up"
                );
                Err(self.timed_out())
            }
            Err(RecvTimeoutError::Disconnected) => {
                Ok(Err(io::Error::other("engine pipe thread panicked")))
            }
        }
    }

    fn timed_out(&self) -> EngineError {
        EngineError::Timeout(self.timeout.unwrap_or_default())
    }
}

impl EngineInvoker for ProcessEngine {
    fn invoke(&self, input: &str) -> Result<String, EngineError> {
        let span = tracing::info_span!(
            "engine_invoke",
            program = %self.program.display(),
            timeout = ?self.timeout,
        );
        let _enter = span.enter();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EngineError::Unavailable {
                program: self.program.display().to_string(),
                source,
            })?;

        let pipes = (child.stdin.take(), child.stdout.take(), child.stderr.take());
        let (stdin, stdout, stderr) = match pipes {
            (Some(stdin), Some(stdout), Some(stderr)) => (stdin, stdout, stderr),
            _ => {
                reap(&mut child);
                return Err(EngineError::Io(io::Error::other(
                    "engine pipes were not captured",
                )));
            }
        };

        let writer = write_input(stdin, input.as_bytes().to_vec());
        let stdout = drain(stdout);
        let stderr = drain(stderr);

        // One deadline bounds both the exit and the pipe reads. On timeout the
        // helper threads are left to finish on their own: a descendant of the
        // engine may still hold the pipes open.
        let deadline = self.timeout.map(|t| Instant::now() + t);
        let status = self.wait(&mut child, deadline)?;

        match self.collect(&writer, deadline)? {
            Ok(()) => {}
            // the engine may legitimately stop reading before all input is sent
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Err(e) => return Err(EngineError::Io(e)),
        }
        let stdout = self.collect(&stdout, deadline)??;
        let stderr = self.collect(&stderr, deadline)??;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
            tracing::warn!(code = ?status.code(), %stderr, "engine failed");
            return Err(EngineError::Failure {
                code: status.code(),
                stderr,
            });
        }

        let output = String::from_utf8(stdout).map_err(|_| EngineError::InvalidUtf8)?;
        if output.trim().is_empty() {
            return Err(EngineError::NoOutput);
        }
        tracing::debug!(bytes = output.len(), "engine finished");
        Ok(output)
    }
}

/// Kill and reap a child whose result is no longer wanted.
fn reap(child: &mut Child) {
    // the child may exit between the last poll and kill
    let _ = child.kill();
    let _ = child.wait();
}

/// Run `task` on a helper thread and hand its result back over a channel.
fn background<T, F>(task: F) -> Receiver<io::Result<T>>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // the receiver is gone once invoke has returned
        let _ = tx.send(task());
    });
    rx
}

fn write_input<W>(mut sink: W, bytes: Vec<u8>) -> Receiver<io::Result<()>>
where
    W: Write + Send + 'static,
{
    background(move || {
        sink.write_all(&bytes)?;
        sink.flush()
        // dropping `sink` closes the engine's stdin
    })
}

fn drain<R: Read + Send + 'static>(mut source: R) -> Receiver<io::Result<Vec<u8>>> {
    background(move || {
        let mut buf = Vec::new();
        source.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

/// Replays captured engine output keyed by the exact input text.
///
/// Lets the parse and render stages run against recorded fixtures without
/// the engine binary. Unrecorded input yields [`EngineError::NoOutput`].
#[derive(Debug, Clone, Default)]
pub struct ReplayEngine {
    recordings: HashMap<String, String>,
}

impl ReplayEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `output` as the engine's answer to `input`.
    pub fn record(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.recordings.insert(input.into(), output.into());
        self
    }

    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }
}

impl EngineInvoker for ReplayEngine {
    fn invoke(&self, input: &str) -> Result<String, EngineError> {
        match self.recordings.get(input) {
            Some(output) => Ok(output.clone()),
            None => {
                tracing::debug!(input_len = input.len(), "no recording for engine input");
                Err(EngineError::NoOutput)
            }
        }
    }
}
