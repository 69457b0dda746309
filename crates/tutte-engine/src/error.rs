//! Engine invocation and pipeline errors.

use std::io;
use std::time::Duration;

use thiserror::Error;
use tutte_graph::GraphError;
use tutte_poly::PolyError;

/// Failures of a single engine invocation. None of these are retried.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine '{program}' could not be started: {source}")]
    Unavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("engine exited with {}: {stderr}", describe_exit(.code))]
    Failure { code: Option<i32>, stderr: String },

    #[error("engine exited successfully but produced no output")]
    NoOutput,

    #[error("engine did not finish within {0:?}")]
    Timeout(Duration),

    #[error("engine output is not valid UTF-8")]
    InvalidUtf8,

    #[error("engine I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid engine config {origin}: {message}")]
    Config { origin: String, message: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Any failure along serialize → invoke → parse → render.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Poly(#[from] PolyError),

    #[error("pipeline worker panicked")]
    WorkerPanicked,
}
