//! serialize → invoke → parse → render.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tutte_graph::{serialize, serialize_checked, AdjacencySource};
use tutte_poly::{parse, render, CoefficientGrid, OutputFormat, Rendered};

use crate::config::EngineConfig;
use crate::error::PipelineError;
use crate::invoker::{EngineInvoker, ProcessEngine};

/// Computes Tutte polynomials through an [`EngineInvoker`].
///
/// Each call is independent: nothing is cached and no state is shared
/// between invocations beyond the engine handle.
pub struct TuttePipeline<E: ?Sized> {
    engine: Arc<E>,
    validate: bool,
}

impl<E: ?Sized> Clone for TuttePipeline<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            validate: self.validate,
        }
    }
}

impl TuttePipeline<ProcessEngine> {
    /// Pipeline backed by the engine executable described by `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(ProcessEngine::from_config(config))
    }
}

impl<E: EngineInvoker> TuttePipeline<E> {
    pub fn new(engine: E) -> Self {
        Self::from_arc(Arc::new(engine))
    }
}

impl<E: EngineInvoker + ?Sized> TuttePipeline<E> {
    pub fn from_arc(engine: Arc<E>) -> Self {
        Self {
            engine,
            validate: false,
        }
    }

    /// Check that graphs are loopless and symmetric before serializing them.
    pub fn validating(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn encode<G: AdjacencySource + ?Sized>(&self, graph: &G) -> Result<String, PipelineError> {
        if self.validate {
            Ok(serialize_checked(graph)?)
        } else {
            Ok(serialize(graph))
        }
    }

    /// The engine's unparsed output for `graph`.
    pub fn raw_output<G: AdjacencySource + ?Sized>(
        &self,
        graph: &G,
    ) -> Result<String, PipelineError> {
        let input = self.encode(graph)?;
        Ok(self.engine.invoke(&input)?)
    }

    /// The coefficient grid of the Tutte polynomial of `graph`.
    pub fn grid<G: AdjacencySource + ?Sized>(
        &self,
        graph: &G,
    ) -> Result<CoefficientGrid, PipelineError> {
        let raw = self.raw_output(graph)?;
        Ok(parse(&raw)?)
    }

    /// The Tutte polynomial of `graph` in the requested format.
    pub fn compute<G: AdjacencySource + ?Sized>(
        &self,
        graph: &G,
        format: OutputFormat,
    ) -> Result<Rendered, PipelineError> {
        let span = tracing::debug_span!("tutte", order = graph.order(), %format);
        let _enter = span.enter();
        let grid = self.grid(graph)?;
        Ok(render(&grid, format))
    }
}

impl<E: EngineInvoker + ?Sized + 'static> TuttePipeline<E> {
    /// Run [`compute`](Self::compute) on a dedicated worker thread, so a
    /// slow engine only blocks whoever joins the returned task.
    pub fn spawn<G>(&self, graph: G, format: OutputFormat) -> PipelineTask
    where
        G: AdjacencySource + Send + 'static,
    {
        let pipeline = self.clone();
        let handle = thread::spawn(move || pipeline.compute(&graph, format));
        PipelineTask { handle }
    }
}

/// A pipeline run in flight on a worker thread.
#[derive(Debug)]
pub struct PipelineTask {
    handle: JoinHandle<Result<Rendered, PipelineError>>,
}

impl PipelineTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the run completes.
    pub fn join(self) -> Result<Rendered, PipelineError> {
        self.handle
            .join()
            .unwrap_or(Err(PipelineError::WorkerPanicked))
    }
}
