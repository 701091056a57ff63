//! Per-generation progress reports.

use std::fmt;

/// Summary of one bred and evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    /// Zero-based generation index.
    pub generation: u64,
    /// Highest fitness in the generation.
    pub best_fitness: f64,
    /// Mean fitness over the generation.
    pub mean_fitness: f64,
    /// Population index of the best genome.
    pub best_index: usize,
}

impl GenerationReport {
    /// Header matching the [`fmt::Display`] row format.
    pub const CSV_HEADER: &'static str = "generation,bestScore";
}

/// Formats as a CSV row: `generation,bestScore`.
impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.generation, self.best_fitness)
    }
}

/// Receives a report after each generation.
pub trait ProgressSink {
    fn record(&mut self, report: &GenerationReport);
}

impl<F: FnMut(&GenerationReport)> ProgressSink for F {
    fn record(&mut self, report: &GenerationReport) {
        self(report)
    }
}
