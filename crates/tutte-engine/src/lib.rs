//! Tutte polynomials by way of the external `tutte_bhkk` engine.
//!
//! The pipeline is strictly one-way:
//!
//! ```text
//! Graph ─serialize─▶ matrix text ─invoke─▶ grid text ─parse─▶ CoefficientGrid ─render─▶ Rendered
//! ```
//!
//! The engine sits behind the [`EngineInvoker`] trait. [`ProcessEngine`] runs
//! the real binary with a timeout; tests substitute a closure.

pub mod config;
pub mod error;
pub mod invoker;
pub mod pipeline;

pub use config::EngineConfig;
pub use error::{EngineError, PipelineError};
pub use invoker::{EngineInvoker, ProcessEngine, ReplayEngine};
pub use pipeline::{PipelineTask, TuttePipeline};

pub use tutte_graph::{AdjacencySource, Graph};
pub use tutte_poly::{CoefficientGrid, OutputFormat, Rendered};
